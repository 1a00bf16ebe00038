//! Prediction endpoint handler

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use super::state::AppState;
use crate::api::types::{ApiError, InvalidModelResponse, Json, PredictQuery};
use crate::domain::{CustomerRecord, DomainError};

/// POST /predict?model={knn|logreg|rf}
///
/// An unknown model is answered with a success status and an error body
/// listing the valid choices.
pub async fn predict(
    State(state): State<AppState>,
    Query(query): Query<PredictQuery>,
    Json(record): Json<CustomerRecord>,
) -> Result<Response, ApiError> {
    debug!(model = ?query.model, "Prediction requested");

    let service = &state.prediction_service;

    match service.predict(&record, query.model.as_deref()) {
        Ok(result) => Ok(Json(result).into_response()),
        Err(err @ DomainError::InvalidModel { .. }) => {
            warn!(error = %err, "Rejected prediction for unknown model");
            let body = InvalidModelResponse::from_error(&err, service.available_models());
            Ok(Json(body).into_response())
        }
        Err(err) => Err(ApiError::from(err)),
    }
}
