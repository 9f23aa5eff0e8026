use crate::core::interp::interp_linear;
use crate::engine::error::ModelError;

/// Strictly increasing radius samples on which every profile is evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGrid {
    radii: Vec<f64>,
}

impl RadialGrid {
    pub fn new(radii: Vec<f64>) -> Result<Self, ModelError> {
        if radii.len() < 2 {
            return Err(ModelError::shape("radial grid (minimum length)", 2, radii.len()));
        }
        if let Some(&bad) = radii.iter().find(|r| !r.is_finite()) {
            return Err(ModelError::invalid("radius", bad, "grid values must be finite"));
        }
        if let Some(pair) = radii.windows(2).find(|w| w[1] <= w[0]) {
            return Err(ModelError::invalid(
                "radius",
                pair[1],
                "grid must be strictly increasing",
            ));
        }
        Ok(Self { radii })
    }

    /// Builds `n` samples spaced evenly in `log(r)` between `r_min` and `r_max`.
    pub fn logspace(r_min: f64, r_max: f64, n: usize) -> Result<Self, ModelError> {
        if n < 2 {
            return Err(ModelError::shape("radial grid (minimum length)", 2, n));
        }
        if !(r_min > 0.0 && r_min.is_finite()) {
            return Err(ModelError::invalid("r_min", r_min, "must be strictly positive"));
        }
        let (log_min, log_max) = (r_min.ln(), r_max.ln());
        let step = (log_max - log_min) / (n - 1) as f64;
        let radii = (0..n)
            .map(|i| (log_min + step * i as f64).exp())
            .collect();
        Self::new(radii)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.radii.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.radii.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.radii
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.radii.iter().copied()
    }

    pub fn r_min(&self) -> f64 {
        self.radii[0]
    }

    pub fn r_max(&self) -> f64 {
        self.radii[self.radii.len() - 1]
    }

    pub fn contains(&self, r: f64) -> bool {
        r >= self.r_min() && r <= self.r_max()
    }

    /// Interpolates `values` (aligned with the grid) at `r`, reporting
    /// positions outside the grid as [`ModelError::OutOfDomain`].
    pub fn interpolate(
        &self,
        parameter: &'static str,
        values: &[f64],
        r: f64,
    ) -> Result<f64, ModelError> {
        if values.len() != self.len() {
            return Err(ModelError::shape(parameter, self.len(), values.len()));
        }
        interp_linear(&self.radii, values, r).ok_or(ModelError::OutOfDomain {
            parameter,
            value: r,
            min: self.r_min(),
            max: self.r_max(),
            planet: None,
        })
    }
}
