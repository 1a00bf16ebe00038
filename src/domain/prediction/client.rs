//! Client-side access to the prediction service

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::model_id::ModelId;
use super::result::PredictionResult;
use crate::domain::customer::CustomerRecord;
use crate::domain::error::DomainError;

#[cfg(test)]
use mockall::automock;

/// Health report of the prediction service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub status: String,
    pub available_models: Vec<ModelId>,
    pub default_model: ModelId,
}

/// Remote prediction service as seen by the dashboard
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PredictionClient: Send + Sync {
    /// Requests one prediction. Any transport failure, non-success status
    /// or error body is reported as [`DomainError::ServiceUnavailable`].
    async fn predict(
        &self,
        record: CustomerRecord,
        model: ModelId,
    ) -> Result<PredictionResult, DomainError>;

    async fn health(&self) -> Result<ServiceHealth, DomainError>;
}
