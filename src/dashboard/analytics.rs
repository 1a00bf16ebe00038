//! Aggregates over the prediction history

use crate::domain::{ChurnLabel, HistoryRecord, ModelId};

/// Counts and series drawn by the results page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistorySummary {
    pub total: usize,
    /// Predictions per outcome message, outcomes with no predictions omitted
    pub outcome_counts: Vec<(String, usize)>,
    /// Predictions per model id, in model order, unused models omitted
    pub model_counts: Vec<(String, usize)>,
    /// Tenure of every prediction in log order
    pub tenure_series: Vec<f64>,
    /// Mean churn probability over the records that have one
    pub mean_probability: Option<f64>,
}

impl HistorySummary {
    pub fn from_records(records: &[HistoryRecord]) -> Self {
        let outcome_counts = [ChurnLabel::Stay, ChurnLabel::Leave]
            .into_iter()
            .map(|label| {
                let count = records.iter().filter(|r| r.prediction == label).count();
                (label.message().to_string(), count)
            })
            .filter(|(_, count)| *count > 0)
            .collect();

        let model_counts = ModelId::ALL
            .into_iter()
            .map(|model| {
                let count = records.iter().filter(|r| r.model == model).count();
                (model.as_str().to_string(), count)
            })
            .filter(|(_, count)| *count > 0)
            .collect();

        let probabilities: Vec<f64> = records.iter().filter_map(|r| r.probability).collect();
        let mean_probability = if probabilities.is_empty() {
            None
        } else {
            Some(probabilities.iter().sum::<f64>() / probabilities.len() as f64)
        };

        Self {
            total: records.len(),
            outcome_counts,
            model_counts,
            tenure_series: records.iter().map(|r| f64::from(r.tenure)).collect(),
            mean_probability,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::history_record;

    #[test]
    fn test_empty_history() {
        let summary = HistorySummary::from_records(&[]);

        assert!(summary.is_empty());
        assert!(summary.outcome_counts.is_empty());
        assert!(summary.model_counts.is_empty());
        assert_eq!(summary.mean_probability, None);
    }

    #[test]
    fn test_counts_and_series() {
        let records = vec![
            history_record(5, ModelId::Rf, ChurnLabel::Leave, Some(0.8), 0),
            history_record(40, ModelId::Knn, ChurnLabel::Stay, Some(0.2), 1),
            history_record(12, ModelId::Rf, ChurnLabel::Leave, None, 2),
        ];

        let summary = HistorySummary::from_records(&records);

        assert_eq!(summary.total, 3);
        assert_eq!(
            summary.outcome_counts,
            vec![
                ("Likely to Stay".to_string(), 1),
                ("Likely to Leave".to_string(), 2)
            ]
        );
        assert_eq!(
            summary.model_counts,
            vec![("knn".to_string(), 1), ("rf".to_string(), 2)]
        );
        assert_eq!(summary.tenure_series, vec![5.0, 40.0, 12.0]);
        assert!((summary.mean_probability.unwrap() - 0.5).abs() < 1e-12);
    }
}
