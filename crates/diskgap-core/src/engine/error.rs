use thiserror::Error;

fn planet_context(planet: &Option<usize>) -> String {
    match planet {
        Some(index) => format!(" (planet #{index})"),
        None => String::new(),
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("Invalid parameter '{parameter}' = {value}{}: {reason}", planet_context(.planet))]
    InvalidParameter {
        parameter: &'static str,
        value: f64,
        reason: &'static str,
        planet: Option<usize>,
    },

    #[error(
        "'{parameter}' = {value} lies outside the radial grid [{min}, {max}]{}",
        planet_context(.planet)
    )]
    OutOfDomain {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
        planet: Option<usize>,
    },

    #[error("Length mismatch for {what}: expected {expected}, found {found}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
}

impl ModelError {
    pub(crate) fn invalid(parameter: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidParameter {
            parameter,
            value,
            reason,
            planet: None,
        }
    }

    pub(crate) fn shape(what: &'static str, expected: usize, found: usize) -> Self {
        Self::ShapeMismatch {
            what,
            expected,
            found,
        }
    }

    /// Attaches the index of the offending planet. Errors that already name a
    /// planet, and shape errors, are returned unchanged.
    pub fn for_planet(self, index: usize) -> Self {
        match self {
            Self::InvalidParameter {
                parameter,
                value,
                reason,
                planet: None,
            } => Self::InvalidParameter {
                parameter,
                value,
                reason,
                planet: Some(index),
            },
            Self::OutOfDomain {
                parameter,
                value,
                min,
                max,
                planet: None,
            } => Self::OutOfDomain {
                parameter,
                value,
                min,
                max,
                planet: Some(index),
            },
            other => other,
        }
    }

    pub fn planet(&self) -> Option<usize> {
        match self {
            Self::InvalidParameter { planet, .. } | Self::OutOfDomain { planet, .. } => *planet,
            Self::ShapeMismatch { .. } => None,
        }
    }
}

/// Rejects values that are not strictly positive and finite.
pub(crate) fn require_positive(parameter: &'static str, value: f64) -> Result<f64, ModelError> {
    if !value.is_finite() {
        return Err(ModelError::invalid(parameter, value, "must be finite"));
    }
    if value <= 0.0 {
        return Err(ModelError::invalid(
            parameter,
            value,
            "must be strictly positive",
        ));
    }
    Ok(value)
}
