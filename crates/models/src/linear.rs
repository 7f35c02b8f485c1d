use common::Result;
use serde::{Deserialize, Serialize};

use crate::{check_width, Predictor};

/// Linear regressor: `intercept + coefficients · features`.
///
/// Covers exports of ordinary least squares, ridge and lasso fits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegressor {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl LinearRegressor {
    pub fn new(intercept: f64, coefficients: Vec<f64>) -> Self {
        Self {
            intercept,
            coefficients,
        }
    }
}

impl Predictor for LinearRegressor {
    fn name(&self) -> &str {
        "Linear"
    }

    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict(&self, features: &[f64]) -> Result<f64> {
        check_width(self.n_features(), features)?;
        Ok(self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(c, x)| c * x)
                .sum::<f64>())
    }
}
