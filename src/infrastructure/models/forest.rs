//! Random forest of binary decision trees

use serde::{Deserialize, Serialize};

use super::error::ArtifactError;
use crate::domain::ChurnLabel;

/// A tree node. Splits send `x[feature] <= threshold` to `left`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        /// Class weights `[stay, leave]` of the training samples in this leaf
        value: [f64; 2],
    },
}

/// Decision tree stored as a flat node list, root at index 0
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    fn validate(&self, tree: usize, num_features: usize) -> Result<(), ArtifactError> {
        let invalid = |node: usize, reason: String| ArtifactError::InvalidTree { tree, node, reason };

        if self.nodes.is_empty() {
            return Err(invalid(0, "tree has no nodes".to_string()));
        }

        for (index, node) in self.nodes.iter().enumerate() {
            match *node {
                TreeNode::Split {
                    feature,
                    left,
                    right,
                    ..
                } => {
                    if feature >= num_features {
                        return Err(invalid(
                            index,
                            format!("feature {} out of range 0..{}", feature, num_features),
                        ));
                    }

                    // children after their parent rules out cycles
                    for child in [left, right] {
                        if child <= index || child >= self.nodes.len() {
                            return Err(invalid(index, format!("bad child index {}", child)));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if value.iter().any(|v| !v.is_finite() || *v < 0.0) || value[0] + value[1] <= 0.0
                    {
                        return Err(invalid(index, format!("bad leaf value {:?}", value)));
                    }
                }
            }
        }

        Ok(())
    }

    /// Share of the churn class in the leaf reached by `features`
    fn leaf_probability(&self, features: &[f64]) -> f64 {
        let mut index = 0;

        loop {
            match self.nodes[index] {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if features[feature] <= threshold { left } else { right };
                }
                TreeNode::Leaf { value } => return value[1] / (value[0] + value[1]),
            }
        }
    }
}

/// Averages the class distributions of its trees
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    pub trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub fn validate(&self, num_features: usize) -> Result<(), ArtifactError> {
        if self.trees.is_empty() {
            return Err(ArtifactError::EmptyForest);
        }

        self.trees
            .iter()
            .enumerate()
            .try_for_each(|(index, tree)| tree.validate(index, num_features))
    }

    pub fn probability(&self, features: &[f64]) -> f64 {
        let total: f64 = self
            .trees
            .iter()
            .map(|tree| tree.leaf_probability(features))
            .sum();

        total / self.trees.len() as f64
    }

    /// Class with the highest mean probability; a tie goes to the lower class
    pub fn predict(&self, features: &[f64]) -> ChurnLabel {
        if self.probability(features) > 0.5 {
            ChurnLabel::Leave
        } else {
            ChurnLabel::Stay
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stump(threshold: f64, left: [f64; 2], right: [f64; 2]) -> DecisionTree {
        DecisionTree {
            nodes: vec![
                TreeNode::Split {
                    feature: 0,
                    threshold,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { value: left },
                TreeNode::Leaf { value: right },
            ],
        }
    }

    fn forest() -> RandomForest {
        RandomForest {
            trees: vec![
                stump(0.5, [8.0, 2.0], [1.0, 3.0]),
                stump(1.5, [6.0, 4.0], [0.0, 5.0]),
            ],
        }
    }

    #[test]
    fn test_traversal_goes_left_on_equal() {
        let tree = stump(0.5, [1.0, 0.0], [0.0, 1.0]);

        assert_eq!(tree.leaf_probability(&[0.5]), 0.0);
        assert_eq!(tree.leaf_probability(&[0.6]), 1.0);
    }

    #[test]
    fn test_probability_averages_trees() {
        let forest = forest();

        // 0.2 and 0.4
        assert!((forest.probability(&[0.0]) - 0.3).abs() < 1e-12);
        // 0.75 and 0.4
        assert!((forest.probability(&[1.0]) - 0.575).abs() < 1e-12);
        // 0.75 and 1.0
        assert!((forest.probability(&[2.0]) - 0.875).abs() < 1e-12);
    }

    #[test]
    fn test_predict() {
        let forest = forest();

        assert_eq!(forest.predict(&[0.0]), ChurnLabel::Stay);
        assert_eq!(forest.predict(&[2.0]), ChurnLabel::Leave);
    }

    #[test]
    fn test_nodes_deserialize_untagged() {
        let tree: DecisionTree = serde_json::from_str(
            r#"{"nodes": [
                {"feature": 0, "threshold": 1.0, "left": 1, "right": 2},
                {"value": [3.0, 1.0]},
                {"value": [0.0, 2.0]}
            ]}"#,
        )
        .unwrap();

        assert_eq!(tree.nodes.len(), 3);
        assert!(matches!(tree.nodes[1], TreeNode::Leaf { value } if value == [3.0, 1.0]));
    }

    #[test]
    fn test_validate_rejects_backward_child() {
        let mut tree = stump(0.5, [1.0, 0.0], [0.0, 1.0]);
        tree.nodes[0] = TreeNode::Split {
            feature: 0,
            threshold: 0.5,
            left: 0,
            right: 2,
        };

        let forest = RandomForest { trees: vec![tree] };
        assert!(matches!(
            forest.validate(1),
            Err(ArtifactError::InvalidTree { tree: 0, node: 0, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_out_of_range_feature() {
        assert!(forest().validate(1).is_ok());

        let forest = RandomForest {
            trees: vec![stump(0.5, [1.0, 0.0], [0.0, 1.0])],
        };
        assert!(forest.validate(0).is_err());
    }

    #[test]
    fn test_validate_rejects_empty_leaf() {
        let forest = RandomForest {
            trees: vec![stump(0.5, [0.0, 0.0], [0.0, 1.0])],
        };

        assert!(matches!(
            forest.validate(1),
            Err(ArtifactError::InvalidTree { node: 1, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_empty_forest() {
        let forest = RandomForest { trees: vec![] };
        assert_eq!(forest.validate(3).unwrap_err(), ArtifactError::EmptyForest);
    }
}
