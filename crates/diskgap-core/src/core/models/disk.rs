use super::grid::RadialGrid;
use super::profile::{RadialField, ScaleHeightProfile, TurbulenceProfile};
use crate::engine::error::{ModelError, require_positive};

/// Local disk conditions at one radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalConditions {
    pub alpha: f64,
    pub scale_height: f64,
}

/// The disk the planets are embedded in: its radial grid, turbulence and
/// scale-height structure, and the central star's mass.
///
/// Shapes and uniform values are checked once here; a caller re-evaluating
/// the model at many times or for many planet sets reuses the same `Disk`.
#[derive(Debug, Clone, PartialEq)]
pub struct Disk {
    grid: RadialGrid,
    alpha: TurbulenceProfile,
    scale_height: ScaleHeightProfile,
    stellar_mass: f64,
}

impl Disk {
    pub fn new(
        grid: RadialGrid,
        alpha: impl Into<TurbulenceProfile>,
        scale_height: impl Into<ScaleHeightProfile>,
        stellar_mass: f64,
    ) -> Result<Self, ModelError> {
        let alpha = alpha.into();
        let scale_height = scale_height.into();
        alpha.validate("alpha", &grid)?;
        scale_height.validate("scale_height", &grid)?;
        let stellar_mass = require_positive("stellar_mass", stellar_mass)?;
        Ok(Self {
            grid,
            alpha,
            scale_height,
            stellar_mass,
        })
    }

    #[inline]
    pub fn grid(&self) -> &RadialGrid {
        &self.grid
    }

    #[inline]
    pub fn alpha(&self) -> &RadialField {
        &self.alpha
    }

    #[inline]
    pub fn scale_height(&self) -> &RadialField {
        &self.scale_height
    }

    #[inline]
    pub fn stellar_mass(&self) -> f64 {
        self.stellar_mass
    }

    pub fn local_conditions(&self, r: f64) -> Result<LocalConditions, ModelError> {
        Ok(LocalConditions {
            alpha: self.alpha.local_value("alpha", &self.grid, r)?,
            scale_height: self.scale_height.local_value("scale_height", &self.grid, r)?,
        })
    }
}
