use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{ForecastError, Result, HORIZON, N_LAGS};

/// Training-time parameters, mirrors models/params.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastParams {
    pub models_path: PathBuf,

    pub n_steps: usize,

    pub n_lags: usize,

    /// Names of the calendar feature columns, in encoder output order.
    #[serde(default)]
    pub exog_columns: Vec<String>,

    #[serde(default)]
    pub years: YearRange,

    #[serde(default = "default_case_sensitive_hotels")]
    pub case_sensitive_hotels: bool,

    /// Hold-out metrics recorded at training time, keyed by hotel name.
    #[serde(default)]
    pub metrics: BTreeMap<String, TrainingMetrics>,
}

impl Default for ForecastParams {
    fn default() -> Self {
        Self {
            models_path: PathBuf::from("models"),
            n_steps: HORIZON,
            n_lags: N_LAGS,
            exog_columns: Vec::new(),
            years: YearRange::default(),
            case_sensitive_hotels: default_case_sensitive_hotels(),
            metrics: BTreeMap::new(),
        }
    }
}

impl ForecastParams {
    /// Read and check a params file. Relative `models_path` values are
    /// resolved against the params file's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ForecastError::ConfigError(format!("can't read {}: {e}", path.display()))
        })?;
        let mut params: ForecastParams = serde_yaml::from_str(&content)?;
        if params.models_path.is_relative() {
            if let Some(dir) = path.parent() {
                params.models_path = dir.join(&params.models_path);
            }
        }
        params.check()?;
        Ok(params)
    }

    pub fn check(&self) -> Result<()> {
        if self.n_steps != HORIZON {
            return Err(ForecastError::ConfigError(format!(
                "expected n_steps={HORIZON}, but {} was given",
                self.n_steps
            )));
        }
        if self.n_lags != N_LAGS {
            return Err(ForecastError::ConfigError(format!(
                "command expects models trained with n_lags={N_LAGS}, but {} was given",
                self.n_lags
            )));
        }
        if self.years.min > self.years.max {
            return Err(ForecastError::ConfigError(format!(
                "empty year range {}..={}",
                self.years.min, self.years.max
            )));
        }
        Ok(())
    }
}

/// Closed range of start years the models support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    #[serde(default = "default_min_year")]
    pub min: i32,
    #[serde(default = "default_max_year")]
    pub max: i32,
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            min: default_min_year(),
            max: default_max_year(),
        }
    }
}

impl YearRange {
    pub fn contains(&self, year: i64) -> bool {
        (self.min as i64..=self.max as i64).contains(&year)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingMetrics {
    pub mae: f64,
    #[serde(default)]
    pub mape: Option<f64>,
}

fn default_case_sensitive_hotels() -> bool {
    true
}
fn default_min_year() -> i32 {
    2023
}
fn default_max_year() -> i32 {
    2025
}
