//! Application state shared by the API handlers

use std::sync::Arc;

use crate::infrastructure::models::ModelRegistry;
use crate::infrastructure::services::PredictionService;

/// Read-only state handed to every request; cloning is cheap
#[derive(Debug, Clone)]
pub struct AppState {
    pub prediction_service: Arc<PredictionService>,
}

impl AppState {
    pub fn new(registry: ModelRegistry) -> Self {
        Self {
            prediction_service: Arc::new(PredictionService::new(Arc::new(registry))),
        }
    }
}
