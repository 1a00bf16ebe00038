//! Predictor trait

use std::fmt::Debug;

use super::result::ChurnLabel;
use crate::domain::customer::CustomerRecord;

/// A loaded, read-only model that scores one customer at a time
pub trait Predictor: Send + Sync + Debug {
    /// Predicted churn label
    fn predict(&self, record: &CustomerRecord) -> ChurnLabel;

    /// Probability of the churn class, `None` when the model has no
    /// probability estimate
    fn predict_proba(&self, _record: &CustomerRecord) -> Option<f64> {
        None
    }
}
