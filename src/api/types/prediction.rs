//! Prediction endpoint types

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, ModelId};

/// Query string of `POST /predict`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictQuery {
    /// Model to use: knn | logreg | rf (default: rf)
    pub model: Option<String>,
}

/// Body returned with a success status when the requested model is unknown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvalidModelResponse {
    pub error: String,
    pub available_models: Vec<ModelId>,
}

impl InvalidModelResponse {
    pub fn from_error(err: &DomainError, available_models: Vec<ModelId>) -> Self {
        Self {
            error: err.to_string(),
            available_models,
        }
    }
}
