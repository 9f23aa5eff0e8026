//! # Workflows Module
//!
//! Top-level entry points of the gap model.
//!
//! - **Gap profile fit** ([`fit`]) - Combines every planet's gap with the initial
//!   profile and the time blend, from typed inputs or from plain arrays

pub mod fit;
