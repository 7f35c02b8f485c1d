use std::fmt;

use common::{ForecastError, Result, HORIZON};
use tracing::debug;

use crate::Predictor;

/// One regressor per horizon step: index 0 predicts t+1, index 5 predicts t+6.
///
/// Every step model reads the same feature layout, so all of them must share
/// one feature width.
pub struct DirectModelSet {
    steps: Vec<Box<dyn Predictor>>,
}

impl DirectModelSet {
    pub fn new(steps: Vec<Box<dyn Predictor>>) -> Result<Self> {
        if steps.len() != HORIZON {
            return Err(ForecastError::ModelCorrupt(format!(
                "expected {HORIZON} step regressors, found {}",
                steps.len()
            )));
        }
        let width = steps[0].n_features();
        for (i, step) in steps.iter().enumerate() {
            step.validate().map_err(|e| {
                ForecastError::ModelCorrupt(format!("step {}: {e}", i + 1))
            })?;
            if step.n_features() != width {
                return Err(ForecastError::ModelCorrupt(format!(
                    "step {} expects {} features, step 1 expects {width}",
                    i + 1,
                    step.n_features()
                )));
            }
        }
        debug!(width = width, "Direct model set assembled");
        Ok(Self { steps })
    }

    pub fn horizon(&self) -> usize {
        self.steps.len()
    }

    pub fn n_features(&self) -> usize {
        self.steps[0].n_features()
    }

    /// Regressor for horizon step `k` (1-based).
    pub fn step(&self, k: usize) -> Option<&dyn Predictor> {
        k.checked_sub(1)
            .and_then(|i| self.steps.get(i))
            .map(|s| s.as_ref())
    }

    /// Predict horizon step `k` (1-based).
    pub fn predict_step(&self, k: usize, features: &[f64]) -> Result<f64> {
        let model = self.step(k).ok_or_else(|| {
            ForecastError::ModelCorrupt(format!("no regressor for horizon step {k}"))
        })?;
        model.predict(features)
    }
}

impl fmt::Debug for DirectModelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectModelSet")
            .field("models", &self.steps.iter().map(|s| s.name()).collect::<Vec<_>>())
            .field("n_features", &self.n_features())
            .finish()
    }
}
