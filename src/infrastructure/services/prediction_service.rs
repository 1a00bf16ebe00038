//! Prediction service - scores customer records with the registered models

use std::sync::Arc;

use tracing::debug;
use validator::Validate;

use crate::domain::{CustomerRecord, DomainError, ModelId, PredictionResult};
use crate::infrastructure::models::ModelRegistry;
use crate::infrastructure::observability::record_prediction;

/// Stateless inference over the read-only model registry
#[derive(Debug, Clone)]
pub struct PredictionService {
    registry: Arc<ModelRegistry>,
}

impl PredictionService {
    pub fn new(registry: Arc<ModelRegistry>) -> Self {
        Self { registry }
    }

    /// Score a record with the requested model, or the default model when
    /// none is given. The record is validated before any model runs.
    pub fn predict(
        &self,
        record: &CustomerRecord,
        requested_model: Option<&str>,
    ) -> Result<PredictionResult, DomainError> {
        record
            .validate()
            .map_err(|e| DomainError::validation(e.to_string()))?;

        let (model_id, predictor) = self.registry.resolve(requested_model)?;

        let prediction = predictor.predict(record);
        let probability = predictor.predict_proba(record);

        debug!(
            model = %model_id,
            prediction = %prediction,
            probability = ?probability,
            "Scored customer record"
        );
        record_prediction(model_id, prediction);

        Ok(PredictionResult::new(model_id, prediction, probability))
    }

    pub fn available_models(&self) -> Vec<ModelId> {
        self.registry.available_models()
    }

    pub fn default_model(&self) -> ModelId {
        self.registry.default_model()
    }
}
