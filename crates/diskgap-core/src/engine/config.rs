use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue {
        field: &'static str,
        reason: String,
    },
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Range of normalized times the model accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeDomain {
    /// `t ∈ [0, 1]`; larger times are rejected.
    #[default]
    Unit,
    /// `t ∈ [0, ∞)`; the blend keeps deepening past the fully carved profile.
    Unbounded,
}

impl TimeDomain {
    pub fn upper_bound(self) -> f64 {
        match self {
            TimeDomain::Unit => 1.0,
            TimeDomain::Unbounded => f64::INFINITY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct GapModelConfig {
    /// Smoothing length in Hill radii; `None` keeps the sharp piecewise profile.
    #[serde(default)]
    pub smoothing: Option<f64>,
    #[serde(default)]
    pub time_domain: TimeDomain,
}

impl GapModelConfig {
    pub fn builder() -> GapModelConfigBuilder {
        GapModelConfigBuilder::new()
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(smoothing) = self.smoothing {
            if !(smoothing.is_finite() && smoothing > 0.0) {
                return Err(ConfigError::InvalidValue {
                    field: "smoothing",
                    reason: format!("expected a positive number of Hill radii, got {smoothing}"),
                });
            }
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct GapModelConfigBuilder {
    smoothing: Option<f64>,
    time_domain: Option<TimeDomain>,
}

impl GapModelConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn smoothing(mut self, hill_radii: f64) -> Self {
        self.smoothing = Some(hill_radii);
        self
    }
    pub fn time_domain(mut self, domain: TimeDomain) -> Self {
        self.time_domain = Some(domain);
        self
    }

    pub fn build(self) -> Result<GapModelConfig, ConfigError> {
        let config = GapModelConfig {
            smoothing: self.smoothing,
            time_domain: self.time_domain.unwrap_or_default(),
        };
        config.validate()?;
        Ok(config)
    }
}
