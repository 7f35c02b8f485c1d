use common::{ForecastError, Result};
use serde::{Deserialize, Serialize};

use crate::{check_width, Predictor};

/// A node of a regression tree stored in a flat array.
///
/// Samples with `features[feature] <= threshold` go to `left`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

impl RegressionTree {
    /// Children must point strictly forward, which rules out cycles.
    fn validate(&self, n_features: usize) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(ForecastError::ModelCorrupt("empty regression tree".into()));
        }
        for (i, node) in self.nodes.iter().enumerate() {
            if let TreeNode::Split {
                feature,
                left,
                right,
                threshold,
            } = node
            {
                if *feature >= n_features {
                    return Err(ForecastError::ModelCorrupt(format!(
                        "node {i} splits on feature {feature}, but only {n_features} exist"
                    )));
                }
                if !threshold.is_finite() {
                    return Err(ForecastError::ModelCorrupt(format!(
                        "node {i} has non-finite threshold"
                    )));
                }
                for child in [left, right] {
                    if *child <= i || *child >= self.nodes.len() {
                        return Err(ForecastError::ModelCorrupt(format!(
                            "node {i} has invalid child index {child}"
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    fn evaluate(&self, features: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                TreeNode::Leaf { value } => return *value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

/// Gradient-boosted regression trees:
/// `base_score + learning_rate * Σ tree(features)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsembleRegressor {
    pub n_features: usize,
    pub base_score: f64,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    pub trees: Vec<RegressionTree>,
}

fn default_learning_rate() -> f64 {
    1.0
}

impl Predictor for TreeEnsembleRegressor {
    fn name(&self) -> &str {
        "TreeEnsemble"
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn validate(&self) -> Result<()> {
        for (t, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features).map_err(|e| {
                ForecastError::ModelCorrupt(format!("tree {t}: {e}"))
            })?;
        }
        Ok(())
    }

    fn predict(&self, features: &[f64]) -> Result<f64> {
        check_width(self.n_features, features)?;
        let boost: f64 = self.trees.iter().map(|t| t.evaluate(features)).sum();
        Ok(self.base_score + self.learning_rate * boost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn stump(feature: usize, threshold: f64, low: f64, high: f64) -> RegressionTree {
        RegressionTree {
            nodes: vec![
                TreeNode::Split {
                    feature,
                    threshold,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { value: low },
                TreeNode::Leaf { value: high },
            ],
        }
    }

    #[test]
    fn test_stump_routes_on_threshold() {
        let model = TreeEnsembleRegressor {
            n_features: 2,
            base_score: 100.0,
            learning_rate: 1.0,
            trees: vec![stump(0, 5.0, -10.0, 10.0)],
        };
        model.validate().unwrap();
        assert_relative_eq!(model.predict(&[5.0, 0.0]).unwrap(), 90.0);
        assert_relative_eq!(model.predict(&[5.1, 0.0]).unwrap(), 110.0);
    }

    #[test]
    fn test_learning_rate_scales_sum() {
        let model = TreeEnsembleRegressor {
            n_features: 2,
            base_score: 0.0,
            learning_rate: 0.5,
            trees: vec![stump(0, 0.0, 2.0, 4.0), stump(1, 0.0, 6.0, 8.0)],
        };
        assert_relative_eq!(model.predict(&[1.0, -1.0]).unwrap(), 0.5 * (4.0 + 6.0));
    }

    #[test]
    fn test_deserialize_from_json() {
        let json = r#"{
            "n_features": 1,
            "base_score": 1.5,
            "trees": [{"nodes": [{"type": "leaf", "value": 2.0}]}]
        }"#;
        let model: TreeEnsembleRegressor = serde_json::from_str(json).unwrap();
        assert_relative_eq!(model.learning_rate, 1.0);
        assert_relative_eq!(model.predict(&[0.0]).unwrap(), 3.5);
    }

    #[test]
    fn test_validate_rejects_backward_child() {
        let model = TreeEnsembleRegressor {
            n_features: 1,
            base_score: 0.0,
            learning_rate: 1.0,
            trees: vec![RegressionTree {
                nodes: vec![
                    TreeNode::Split {
                        feature: 0,
                        threshold: 0.0,
                        left: 0,
                        right: 1,
                    },
                    TreeNode::Leaf { value: 1.0 },
                ],
            }],
        };
        assert!(matches!(model.validate(), Err(ForecastError::ModelCorrupt(_))));
    }

    #[test]
    fn test_validate_rejects_unknown_feature() {
        let model = TreeEnsembleRegressor {
            n_features: 1,
            base_score: 0.0,
            learning_rate: 1.0,
            trees: vec![stump(3, 0.0, 1.0, 2.0)],
        };
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_tree() {
        let model = TreeEnsembleRegressor {
            n_features: 1,
            base_score: 0.0,
            learning_rate: 1.0,
            trees: vec![RegressionTree { nodes: vec![] }],
        };
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_shape_mismatch() {
        let model = TreeEnsembleRegressor {
            n_features: 3,
            base_score: 0.0,
            learning_rate: 1.0,
            trees: vec![],
        };
        assert!(matches!(
            model.predict(&[1.0]),
            Err(ForecastError::FeatureShapeMismatch {
                expected: 3,
                actual: 1
            })
        ));
    }
}
