use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("model not found for {hotel}: {}", path.display())]
    ModelNotFound { hotel: String, path: PathBuf },

    #[error("model corrupt: {0}")]
    ModelCorrupt(String),

    #[error("invalid month: {0} (expected 1..=12)")]
    InvalidMonth(i64),

    #[error("feature shape mismatch: regressor expects {expected} features, got {actual}")]
    FeatureShapeMismatch { expected: usize, actual: usize },

    #[error("invalid prediction at step {step}: {value}")]
    InvalidPrediction { step: usize, value: f64 },

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ForecastError {
    /// Pipeline stage the error belongs to, used when reporting failures.
    pub fn stage(&self) -> &'static str {
        match self {
            ForecastError::InvalidParameter(_) => "validate",
            ForecastError::ModelNotFound { .. } | ForecastError::ModelCorrupt(_) => "load",
            ForecastError::InvalidMonth(_)
            | ForecastError::FeatureShapeMismatch { .. }
            | ForecastError::InvalidPrediction { .. } => "forecast",
            ForecastError::ConfigError(_) | ForecastError::Yaml(_) => "config",
        }
    }
}

pub type Result<T> = std::result::Result<T, ForecastError>;
