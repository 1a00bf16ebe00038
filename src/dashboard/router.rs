use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::cookie::session_middleware;
use super::handlers;
use super::state::DashboardState;
use crate::api::middleware::{logging_middleware, security_headers_middleware};

/// Create the dashboard router
pub fn create_dashboard_router(state: DashboardState) -> Router {
    Router::new()
        .route("/", get(handlers::show_page))
        .route("/predict", post(handlers::submit_prediction))
        .route("/model", post(handlers::select_model))
        .route("/new", post(handlers::new_prediction))
        .route("/clear", post(handlers::clear_history))
        .with_state(state)
        .layer(middleware::from_fn(session_middleware))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}
