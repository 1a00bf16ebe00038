//! Health check endpoint

use axum::extract::State;

use super::state::AppState;
use crate::api::types::Json;
use crate::domain::ServiceHealth;

pub const RUNNING_STATUS: &str = "API is running";

/// GET /
pub async fn health_check(State(state): State<AppState>) -> Json<ServiceHealth> {
    let service = &state.prediction_service;

    Json(ServiceHealth {
        status: RUNNING_STATUS.to_string(),
        available_models: service.available_models(),
        default_model: service.default_model(),
    })
}
