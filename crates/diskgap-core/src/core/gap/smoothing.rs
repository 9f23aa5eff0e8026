use crate::core::models::planet::Planet;
use crate::engine::error::{ModelError, require_positive};

/// Width of the smoothing kernel, `smooth * r_H`, for a smoothing length
/// given in Hill radii.
pub fn smoothing_width(
    planet: &Planet,
    stellar_mass: f64,
    smooth: f64,
) -> Result<f64, ModelError> {
    let smooth = require_positive("smooth", smooth)?;
    Ok(smooth * planet.hill_radius(stellar_mass))
}

/// Tapers a gap factor toward 1 away from the planet:
/// `exp(ln(factor) * exp(-0.5 * ((r - a_p) / width)^4))`.
#[inline]
pub fn smooth_factor(factor: f64, r: f64, semimajor_axis: f64, width: f64) -> f64 {
    let x = (r - semimajor_axis) / width;
    let kernel = (-0.5 * x.powi(4)).exp();
    (factor.ln() * kernel).exp()
}
