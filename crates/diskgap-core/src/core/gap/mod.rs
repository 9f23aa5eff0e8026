//! # Gap Module
//!
//! Analytic surface-density gaps carved by embedded planets, after
//! Kanagawa et al. (2016).
//!
//! A planet of mass ratio `q = m_p / M_star` in a disk of local aspect ratio
//! `h = hp / a_p` and turbulence `alpha` opens a gap whose depth is set by
//! `K = q^2 h^-5 / alpha` and whose width is set by `K' = q^2 h^-3 / alpha`.
//! The profile has a flat floor at `1 / (1 + 0.04 K)` out to `ΔR1`, a linear
//! ramp out to `ΔR2`, and is undisturbed beyond.
//!
//! - [`kanagawa`] - Gap parameters and the piecewise factor
//! - [`smoothing`] - Optional Hill-radius taper that removes the sharp edges

pub mod kanagawa;
pub mod smoothing;
