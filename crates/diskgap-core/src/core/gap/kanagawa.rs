use super::smoothing::{smooth_factor, smoothing_width};
use crate::core::models::disk::Disk;
use crate::core::models::planet::Planet;
use crate::engine::error::{ModelError, require_positive};
use tracing::{debug, instrument};

// Coefficients of the Kanagawa et al. (2016) gap model; equation numbers refer
// to that paper.
const DEPTH_COEFFICIENT: f64 = 0.04; // Eq. 11
const FLOOR_WIDTH_OFFSET: f64 = 0.08; // Eq. 8
const GAP_WIDTH_COEFFICIENT: f64 = 0.33; // Eq. 9
const RAMP_SLOPE: f64 = 4.0; // Eq. 7
const RAMP_OFFSET: f64 = 0.32; // Eq. 7

/// Gap shape quantities for one planet, derived from the local disk
/// conditions at its semimajor axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapParameters {
    pub semimajor_axis: f64,
    /// `m_p / M_star`.
    pub mass_ratio: f64,
    /// `hp(a_p) / a_p`.
    pub aspect_ratio: f64,
    pub alpha: f64,
    /// `q^2 h^-5 / alpha`, controls the gap depth.
    pub k: f64,
    /// `q^2 h^-3 / alpha`, controls the gap width.
    pub k_prime: f64,
    /// Depletion factor at the bottom of the gap.
    pub factor_min: f64,
    /// Distance from the planet over which the gap floor is flat (`ΔR1`).
    pub floor_half_width: f64,
    /// Distance from the planet beyond which the disk is undisturbed (`ΔR2`).
    pub gap_half_width: f64,
}

impl GapParameters {
    /// Derives the gap shape from the planet's position and mass ratio and
    /// the local aspect ratio and turbulence. All four must be finite and
    /// strictly positive.
    pub fn from_local(
        semimajor_axis: f64,
        mass_ratio: f64,
        aspect_ratio: f64,
        alpha: f64,
    ) -> Result<Self, ModelError> {
        let semimajor_axis = require_positive("semimajor_axis", semimajor_axis)?;
        let mass_ratio = require_positive("mass_ratio", mass_ratio)?;
        let aspect_ratio = require_positive("aspect_ratio", aspect_ratio)?;
        let alpha = require_positive("alpha", alpha)?;

        let q2 = mass_ratio * mass_ratio;
        let k = q2 * aspect_ratio.powi(-5) / alpha;
        let k_prime = q2 * aspect_ratio.powi(-3) / alpha;

        let factor_min = 1.0 / (1.0 + DEPTH_COEFFICIENT * k);
        let width_scale = k_prime.powf(0.25) * semimajor_axis;

        Ok(Self {
            semimajor_axis,
            mass_ratio,
            aspect_ratio,
            alpha,
            k,
            k_prime,
            factor_min,
            floor_half_width: (factor_min / 4.0 + FLOOR_WIDTH_OFFSET) * width_scale,
            gap_half_width: GAP_WIDTH_COEFFICIENT * width_scale,
        })
    }

    /// Linear ramp between the gap floor and the undisturbed disk.
    #[inline]
    pub fn ramp(&self, r: f64) -> f64 {
        RAMP_SLOPE * self.k_prime.powf(-0.25) * (r - self.semimajor_axis).abs()
            / self.semimajor_axis
            - RAMP_OFFSET
    }

    /// Piecewise gap factor at radius `r`. The ramp owns both of its
    /// boundaries and never exceeds 1.
    #[inline]
    pub fn factor_at(&self, r: f64) -> f64 {
        let distance = (r - self.semimajor_axis).abs();
        if distance < self.floor_half_width {
            self.factor_min
        } else if distance <= self.gap_half_width {
            self.ramp(r).min(1.0)
        } else {
            1.0
        }
    }

    /// Inner and outer radius of the disturbed region, `a_p ∓ ΔR2`.
    pub fn edges(&self) -> (f64, f64) {
        (
            self.semimajor_axis - self.gap_half_width,
            self.semimajor_axis + self.gap_half_width,
        )
    }

    pub fn overlaps(&self, other: &GapParameters) -> bool {
        let (inner, outer) = self.edges();
        let (other_inner, other_outer) = other.edges();
        inner <= other_outer && other_inner <= outer
    }
}

/// Evaluates the local disk conditions at the planet and derives its gap
/// parameters.
pub fn gap_parameters(disk: &Disk, planet: &Planet) -> Result<GapParameters, ModelError> {
    let a_p = planet.semimajor_axis();
    let local = disk.local_conditions(a_p)?;
    let params = GapParameters::from_local(
        a_p,
        planet.mass() / disk.stellar_mass(),
        local.scale_height / a_p,
        local.alpha,
    )?;
    debug!(
        a_p,
        k = params.k,
        k_prime = params.k_prime,
        factor_min = params.factor_min,
        "Derived gap parameters."
    );
    Ok(params)
}

/// A planet's gap parameters together with its factor on the disk grid.
#[derive(Debug, Clone, PartialEq)]
pub struct CarvedGap {
    pub params: GapParameters,
    pub factors: Vec<f64>,
}

/// Evaluates the gap factor of `planet` on every grid point of `disk`.
///
/// `smooth`, when set, is the smoothing length in Hill radii.
#[instrument(level = "trace", skip_all, fields(a_p = planet.semimajor_axis()))]
pub fn carve_gap(
    disk: &Disk,
    planet: &Planet,
    smooth: Option<f64>,
) -> Result<CarvedGap, ModelError> {
    let params = gap_parameters(disk, planet)?;
    let width = smooth
        .map(|s| smoothing_width(planet, disk.stellar_mass(), s))
        .transpose()?;

    let factors = disk
        .grid()
        .iter()
        .map(|r| {
            let factor = params.factor_at(r);
            match width {
                Some(w) => smooth_factor(factor, r, params.semimajor_axis, w),
                None => factor,
            }
        })
        .collect();
    Ok(CarvedGap { params, factors })
}

/// Multiplicative surface-density reduction carved by a single planet,
/// one value per grid point, in `(0, 1]`.
pub fn single_planet_gap_factor(
    disk: &Disk,
    planet: &Planet,
    smooth: Option<f64>,
) -> Result<Vec<f64>, ModelError> {
    carve_gap(disk, planet, smooth).map(|gap| gap.factors)
}
