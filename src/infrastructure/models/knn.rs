//! k-nearest-neighbors classifier

use serde::{Deserialize, Serialize};

use super::error::ArtifactError;
use crate::domain::ChurnLabel;

/// Vote weighting of the neighbors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NeighborWeights {
    #[default]
    Uniform,
    Distance,
}

/// Stored training samples voted over by Euclidean distance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KNeighbors {
    pub n_neighbors: usize,
    #[serde(default)]
    pub weights: NeighborWeights,
    pub samples: Vec<Vec<f64>>,
    pub labels: Vec<ChurnLabel>,
}

impl KNeighbors {
    pub fn validate(&self, num_features: usize) -> Result<(), ArtifactError> {
        if self.samples.is_empty() {
            return Err(ArtifactError::InvalidNeighbors("no training samples".to_string()));
        }

        if self.samples.len() != self.labels.len() {
            return Err(ArtifactError::InvalidNeighbors(format!(
                "{} samples but {} labels",
                self.samples.len(),
                self.labels.len()
            )));
        }

        if self.n_neighbors == 0 || self.n_neighbors > self.samples.len() {
            return Err(ArtifactError::InvalidNeighbors(format!(
                "n_neighbors must be between 1 and {}, got {}",
                self.samples.len(),
                self.n_neighbors
            )));
        }

        if let Some(sample) = self.samples.iter().find(|s| s.len() != num_features) {
            return Err(ArtifactError::FeatureMismatch {
                what: "neighbors sample",
                expected: sample.len(),
                found: num_features,
            });
        }

        Ok(())
    }

    /// Weighted share of churn votes among the nearest neighbors
    pub fn probability(&self, features: &[f64]) -> f64 {
        let neighbors = self.nearest(features);

        let weights: Vec<(f64, ChurnLabel)> = match self.weights {
            NeighborWeights::Uniform => neighbors.iter().map(|&(_, label)| (1.0, label)).collect(),
            NeighborWeights::Distance => {
                // Exact matches take all the weight
                if neighbors.iter().any(|&(d, _)| d == 0.0) {
                    neighbors
                        .iter()
                        .filter(|&&(d, _)| d == 0.0)
                        .map(|&(_, label)| (1.0, label))
                        .collect()
                } else {
                    neighbors.iter().map(|&(d, label)| (1.0 / d, label)).collect()
                }
            }
        };

        let total: f64 = weights.iter().map(|(w, _)| w).sum();
        let churn: f64 = weights
            .iter()
            .filter(|(_, label)| *label == ChurnLabel::Leave)
            .map(|(w, _)| w)
            .sum();

        churn / total
    }

    /// Majority vote; a tie goes to the lower class
    pub fn predict(&self, features: &[f64]) -> ChurnLabel {
        if self.probability(features) > 0.5 {
            ChurnLabel::Leave
        } else {
            ChurnLabel::Stay
        }
    }

    /// The `n_neighbors` closest samples as (distance, label), nearest first.
    /// Equal distances keep training order.
    fn nearest(&self, features: &[f64]) -> Vec<(f64, ChurnLabel)> {
        let mut distances: Vec<(f64, ChurnLabel)> = self
            .samples
            .iter()
            .zip(&self.labels)
            .map(|(sample, &label)| (euclidean(sample, features), label))
            .collect();

        distances.sort_by(|a, b| a.0.total_cmp(&b.0));
        distances.truncate(self.n_neighbors);
        distances
    }
}

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(n_neighbors: usize, weights: NeighborWeights) -> KNeighbors {
        KNeighbors {
            n_neighbors,
            weights,
            samples: vec![vec![0.0], vec![1.0], vec![2.0], vec![10.0]],
            labels: vec![
                ChurnLabel::Leave,
                ChurnLabel::Leave,
                ChurnLabel::Stay,
                ChurnLabel::Stay,
            ],
        }
    }

    #[test]
    fn test_uniform_vote() {
        let knn = model(3, NeighborWeights::Uniform);

        assert!((knn.probability(&[0.5]) - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(knn.predict(&[0.5]), ChurnLabel::Leave);
        assert_eq!(knn.predict(&[9.0]), ChurnLabel::Stay);
    }

    #[test]
    fn test_tie_goes_to_stay() {
        let knn = model(2, NeighborWeights::Uniform);

        // nearest are 1.0 (leave) and 2.0 (stay)
        assert_eq!(knn.probability(&[1.6]), 0.5);
        assert_eq!(knn.predict(&[1.6]), ChurnLabel::Stay);
    }

    #[test]
    fn test_distance_weighting() {
        let knn = model(2, NeighborWeights::Distance);

        // neighbors 2.0 (d=0.25, stay) and 1.0 (d=0.75, leave)
        let p = knn.probability(&[1.75]);
        assert!((p - (1.0 / 0.75) / (1.0 / 0.25 + 1.0 / 0.75)).abs() < 1e-12);
        assert_eq!(knn.predict(&[1.75]), ChurnLabel::Stay);
    }

    #[test]
    fn test_distance_weighting_exact_match() {
        let knn = model(3, NeighborWeights::Distance);

        assert_eq!(knn.probability(&[2.0]), 0.0);
        assert_eq!(knn.probability(&[0.0]), 1.0);
    }

    #[test]
    fn test_validate() {
        assert!(model(3, NeighborWeights::Uniform).validate(1).is_ok());
        assert!(model(5, NeighborWeights::Uniform).validate(1).is_err());
        assert!(model(0, NeighborWeights::Uniform).validate(1).is_err());
        assert!(matches!(
            model(3, NeighborWeights::Uniform).validate(2),
            Err(ArtifactError::FeatureMismatch { .. })
        ));

        let mut knn = model(1, NeighborWeights::Uniform);
        knn.labels.pop();
        assert!(matches!(knn.validate(1), Err(ArtifactError::InvalidNeighbors(_))));
    }
}
