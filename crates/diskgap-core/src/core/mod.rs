//! # Core Module
//!
//! Stateless building blocks of the gap model.
//!
//! - **Disk and planet representation** ([`models`]) - Radial grids, profiles, planets
//! - **Gap physics** ([`gap`]) - Kanagawa gap parameters, the piecewise gap factor and smoothing
//! - **Interpolation** ([`interp`]) - Endpoint-inclusive linear lookup on a monotonic grid
//! - **Constants** ([`constants`]) - cgs astronomical units and masses

pub mod constants;
pub mod gap;
pub mod interp;
pub mod models;
