//! Linear estimators (logistic regression and linear SVC)

use serde::{Deserialize, Serialize};

use super::error::ArtifactError;
use crate::domain::ChurnLabel;

/// Coefficients plus intercept of a binary linear decision function
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    pub coefficients: Vec<f64>,
    #[serde(default)]
    pub intercept: f64,
}

impl LinearModel {
    pub fn validate(&self, num_features: usize) -> Result<(), ArtifactError> {
        if self.coefficients.len() != num_features {
            return Err(ArtifactError::FeatureMismatch {
                what: "linear model",
                expected: self.coefficients.len(),
                found: num_features,
            });
        }

        Ok(())
    }

    /// Signed distance to the separating hyperplane
    #[inline]
    pub fn decision(&self, features: &[f64]) -> f64 {
        self.coefficients
            .iter()
            .zip(features)
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept
    }

    pub fn predict(&self, features: &[f64]) -> ChurnLabel {
        if self.decision(features) > 0.0 {
            ChurnLabel::Leave
        } else {
            ChurnLabel::Stay
        }
    }

    /// Logistic probability of the churn class
    pub fn probability(&self, features: &[f64]) -> f64 {
        sigmoid(self.decision(features))
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
