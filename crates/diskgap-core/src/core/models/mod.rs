//! # Models Module
//!
//! Immutable value types describing the disk and its planets. Constructors
//! validate their input and return [`ModelError`](crate::engine::error::ModelError)
//! on failure, so every value that exists is well formed.
//!
//! - [`grid`] - Strictly increasing radial sample points
//! - [`profile`] - Surface-density profiles and uniform-or-sampled radial fields
//! - [`planet`] - Planets and planet sets
//! - [`disk`] - Grid, turbulence, scale height and stellar mass bundled together

pub mod disk;
pub mod grid;
pub mod planet;
pub mod profile;
