use super::grid::RadialGrid;
use crate::engine::error::{ModelError, require_positive};

/// Gas surface density sampled on a [`RadialGrid`], index for index.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceDensityProfile {
    values: Vec<f64>,
}

impl SurfaceDensityProfile {
    pub fn new(values: Vec<f64>) -> Result<Self, ModelError> {
        if let Some(&bad) = values.iter().find(|v| !(v.is_finite() && **v >= 0.0)) {
            return Err(ModelError::invalid(
                "surface_density",
                bad,
                "must be finite and non-negative",
            ));
        }
        Ok(Self { values })
    }

    /// Evaluates `f(r)` on every grid point.
    pub fn from_fn(grid: &RadialGrid, f: impl Fn(f64) -> f64) -> Result<Self, ModelError> {
        Self::new(grid.iter().map(f).collect())
    }

    pub(crate) fn ensure_aligned(&self, grid: &RadialGrid) -> Result<(), ModelError> {
        if self.values.len() != grid.len() {
            return Err(ModelError::shape(
                "surface density vs. radial grid",
                grid.len(),
                self.values.len(),
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }
}

/// A radial quantity given either as one value for the whole disk or as
/// samples aligned with the radial grid. Used for the turbulence parameter
/// `alpha` and the pressure scale height `hp`.
#[derive(Debug, Clone, PartialEq)]
pub enum RadialField {
    Uniform(f64),
    Sampled(Vec<f64>),
}

pub type TurbulenceProfile = RadialField;
pub type ScaleHeightProfile = RadialField;

impl RadialField {
    /// Builds a field from a constant aspect ratio `h = hp / r`.
    pub fn from_aspect_ratio(grid: &RadialGrid, aspect_ratio: f64) -> Self {
        Self::Sampled(grid.iter().map(|r| aspect_ratio * r).collect())
    }

    pub(crate) fn validate(
        &self,
        parameter: &'static str,
        grid: &RadialGrid,
    ) -> Result<(), ModelError> {
        match self {
            Self::Uniform(value) => require_positive(parameter, *value).map(|_| ()),
            Self::Sampled(values) if values.len() != grid.len() => {
                Err(ModelError::shape(parameter, grid.len(), values.len()))
            }
            Self::Sampled(values) => match values.iter().find(|v| !v.is_finite()) {
                Some(&bad) => Err(ModelError::invalid(parameter, bad, "must be finite")),
                None => Ok(()),
            },
        }
    }

    /// Value of the field at radius `r`, which must lie on the grid span.
    ///
    /// The result must be strictly positive; a zero or negative local value is
    /// reported as [`ModelError::InvalidParameter`].
    pub fn local_value(
        &self,
        parameter: &'static str,
        grid: &RadialGrid,
        r: f64,
    ) -> Result<f64, ModelError> {
        let value = match self {
            Self::Uniform(value) => {
                if !grid.contains(r) {
                    return Err(ModelError::OutOfDomain {
                        parameter: "semimajor_axis",
                        value: r,
                        min: grid.r_min(),
                        max: grid.r_max(),
                        planet: None,
                    });
                }
                *value
            }
            Self::Sampled(values) => grid
                .interpolate(parameter, values, r)
                .map_err(|err| match err {
                    ModelError::OutOfDomain {
                        value, min, max, ..
                    } => ModelError::OutOfDomain {
                        parameter: "semimajor_axis",
                        value,
                        min,
                        max,
                        planet: None,
                    },
                    other => other,
                })?,
        };
        require_positive(parameter, value)
    }
}

impl From<f64> for RadialField {
    fn from(value: f64) -> Self {
        Self::Uniform(value)
    }
}

impl From<Vec<f64>> for RadialField {
    fn from(values: Vec<f64>) -> Self {
        Self::Sampled(values)
    }
}

impl From<&[f64]> for RadialField {
    fn from(values: &[f64]) -> Self {
        Self::Sampled(values.to_vec())
    }
}
