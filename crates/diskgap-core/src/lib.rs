//! # diskgap
//!
//! Analytic surface-density gaps carved by planets embedded in a
//! protoplanetary disk, following the Kanagawa et al. (2016) gap depth and
//! width prescription.
//!
//! Given a radial grid, an initial gas surface-density profile, the disk's
//! turbulence and scale height, the stellar mass, a set of planets and a
//! normalized time, the model returns the surface density with every planet's
//! gap partially or fully carved. Evaluation is pure and deterministic.
//!
//! - **[`core`]** - Value types for the disk and planets, interpolation, and the
//!   single-planet gap physics.
//! - **[`engine`]** - Configuration, the error taxonomy and progress reporting.
//! - **[`workflows`]** - The multi-planet fit that ties everything together.
//!
//! ```
//! use diskgap::core::constants::{AU, M_JUP, M_SUN};
//! use diskgap::core::models::{disk::Disk, grid::RadialGrid, planet::PlanetSet};
//! use diskgap::core::models::profile::{RadialField, SurfaceDensityProfile};
//! use diskgap::engine::config::GapModelConfig;
//! use diskgap::workflows::fit::multi_planet_fit;
//!
//! let grid = RadialGrid::logspace(1.0 * AU, 100.0 * AU, 200)?;
//! let hp = RadialField::from_aspect_ratio(&grid, 0.05);
//! let sigma = SurfaceDensityProfile::from_fn(&grid, |r| 100.0 * AU / r)?;
//! let disk = Disk::new(grid, 1e-3, hp, M_SUN)?;
//! let planets = PlanetSet::from_parallel(&[M_JUP], &[10.0 * AU])?;
//!
//! let carved = multi_planet_fit(&disk, &sigma, 1.0, &planets, &GapModelConfig::default())?;
//! assert_eq!(carved.len(), sigma.len());
//! # Ok::<(), diskgap::engine::error::ModelError>(())
//! ```

pub mod core;
pub mod engine;
pub mod workflows;

pub use crate::core::gap::kanagawa::single_planet_gap_factor;
pub use crate::workflows::fit::multi_planet_fit;
