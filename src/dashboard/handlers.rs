//! Dashboard request handlers
//!
//! Every POST updates the caller's session and redirects back to `/`, which
//! renders whichever page the session is on.

use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use chrono::Utc;
use tracing::{error, info, warn};

use super::cookie::SessionId;
use super::form::{ModelSelection, PredictionForm};
use super::session::{Notice, Page, SessionEvent};
use super::state::DashboardState;
use super::view::{render_error_page, render_page, PageContext, SERVICE_UNAVAILABLE};
use crate::domain::{DomainError, HistoryRecord};

/// GET /
pub async fn show_page(
    State(state): State<DashboardState>,
    Extension(SessionId(id)): Extension<SessionId>,
) -> Response {
    let (session, notice) = state.sessions.take_for_render(id).await;

    let health = state.client.health().await.map_err(|e| e.to_string());

    let mut ctx = PageContext {
        page: session.page,
        selected_model: session.selected_model,
        notice,
        health,
        api_url: state.api_url.clone(),
        draft: session
            .last_prediction
            .as_ref()
            .map(HistoryRecord::customer)
            .unwrap_or_default(),
        last_prediction: session.last_prediction,
        history: None,
    };

    if ctx.page == Page::Results {
        match state.history.load().await {
            Ok(records) => ctx.history = Some(records),
            Err(e) => {
                error!(error = %e, "Failed to read prediction history");
                let message = format!("Could not read prediction history: {}", e);
                let html = render_error_page(&ctx, &message);
                return (StatusCode::INTERNAL_SERVER_ERROR, Html(html)).into_response();
            }
        }
    }

    Html(render_page(&ctx)).into_response()
}

/// POST /predict
pub async fn submit_prediction(
    State(state): State<DashboardState>,
    Extension(SessionId(id)): Extension<SessionId>,
    form: Result<Form<PredictionForm>, FormRejection>,
) -> Redirect {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            let message = DomainError::validation(rejection.body_text()).to_string();
            warn!(error = %message, "Unreadable prediction form");
            let notice = Notice::error(message);
            state
                .sessions
                .update(id, |s| s.apply(SessionEvent::PredictionFailed(notice)))
                .await;
            return Redirect::to("/");
        }
    };

    let requested_model = form.model;
    let (record, model) = match form.into_request() {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "Rejected prediction form");
            let event = SessionEvent::PredictionFailed(Notice::error(e.to_string()));
            state
                .sessions
                .update(id, |s| {
                    s.selected_model = requested_model;
                    s.apply(event)
                })
                .await;
            return Redirect::to("/");
        }
    };

    let result = match state.client.predict(record.clone(), model).await {
        Ok(result) => result,
        Err(e) => {
            warn!(model = %model, error = %e, "Prediction request failed");
            let event = SessionEvent::PredictionFailed(Notice::error(SERVICE_UNAVAILABLE));
            state
                .sessions
                .update(id, |s| {
                    s.selected_model = model;
                    s.apply(event)
                })
                .await;
            return Redirect::to("/");
        }
    };

    let entry = HistoryRecord::new(record, &result, Utc::now());
    let save_notice = match state.history.append(entry.clone()).await {
        Ok(()) => None,
        Err(e) => {
            error!(error = %e, "Failed to record prediction");
            Some(Notice::error(format!("Prediction could not be saved to history: {}", e)))
        }
    };

    info!(
        model = %result.model_used,
        prediction = %result.prediction,
        probability = ?result.churn_probability,
        "Prediction received"
    );

    state
        .sessions
        .update(id, |s| {
            s.apply(SessionEvent::PredictionSucceeded(entry));
            if save_notice.is_some() {
                s.notice = save_notice;
            }
        })
        .await;

    Redirect::to("/")
}

/// POST /model
pub async fn select_model(
    State(state): State<DashboardState>,
    Extension(SessionId(id)): Extension<SessionId>,
    Form(selection): Form<ModelSelection>,
) -> Redirect {
    state
        .sessions
        .update(id, |s| s.selected_model = selection.model)
        .await;

    Redirect::to("/")
}

/// POST /new
pub async fn new_prediction(
    State(state): State<DashboardState>,
    Extension(SessionId(id)): Extension<SessionId>,
) -> Redirect {
    state
        .sessions
        .update(id, |s| s.apply(SessionEvent::NewPrediction))
        .await;

    Redirect::to("/")
}

/// POST /clear
pub async fn clear_history(
    State(state): State<DashboardState>,
    Extension(SessionId(id)): Extension<SessionId>,
) -> Redirect {
    match state.history.clear().await {
        Ok(()) => {
            info!("Prediction history cleared");
            state
                .sessions
                .update(id, |s| {
                    s.apply(SessionEvent::ClearAll);
                    s.notice = Some(Notice::info("All predictions cleared."));
                })
                .await;
        }
        Err(e) => {
            error!(error = %e, "Failed to clear prediction history");
            state
                .sessions
                .update(id, |s| {
                    s.notice = Some(Notice::error(format!("Could not clear history: {}", e)));
                })
                .await;
        }
    }

    Redirect::to("/")
}
