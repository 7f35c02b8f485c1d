mod direct;
mod linear;
mod tree;

pub use direct::DirectModelSet;
pub use linear::LinearRegressor;
pub use tree::{RegressionTree, TreeEnsembleRegressor, TreeNode};

use common::{ForecastError, Result};
use serde::{Deserialize, Serialize};

/// Trait that all fitted regressors must implement.
///
/// A regressor maps one feature row to one revenue estimate. The orchestrator
/// only ever talks to this trait.
pub trait Predictor: Send + Sync {
    /// Returns the model family's name.
    fn name(&self) -> &str;

    /// Feature width the regressor was fitted with.
    fn n_features(&self) -> usize;

    /// Structural checks run once after deserialization.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn predict(&self, features: &[f64]) -> Result<f64>;
}

pub(crate) fn check_width(expected: usize, features: &[f64]) -> Result<()> {
    if features.len() != expected {
        return Err(ForecastError::FeatureShapeMismatch {
            expected,
            actual: features.len(),
        });
    }
    Ok(())
}

/// Persisted form of a regressor, tagged by model family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Regressor {
    Linear(LinearRegressor),
    TreeEnsemble(TreeEnsembleRegressor),
}

impl Regressor {
    pub fn into_predictor(self) -> Box<dyn Predictor> {
        match self {
            Regressor::Linear(m) => Box::new(m),
            Regressor::TreeEnsemble(m) => Box::new(m),
        }
    }
}
