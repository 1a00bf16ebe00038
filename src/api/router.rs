use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::health;
use super::middleware::{logging_middleware, metrics_middleware, security_headers_middleware};
use super::predict;
use super::state::AppState;
use crate::infrastructure::observability::{create_metrics_router, PrometheusMetrics};

/// Create the prediction service router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::health_check))
        .route("/predict", post(predict::predict))
        .with_state(state)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Prediction service router plus the Prometheus endpoint, with request
/// metrics recorded for every route
pub fn create_router_with_metrics(
    state: AppState,
    metrics: PrometheusMetrics,
    metrics_path: &str,
) -> Router {
    create_router(state)
        .merge(create_metrics_router(metrics, metrics_path))
        .layer(middleware::from_fn(metrics_middleware))
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::domain::{ChurnLabel, CustomerRecord};
    use crate::testing::{bundled_registry, counting_registry};

    fn app() -> Router {
        create_router(AppState::new(bundled_registry()))
    }

    fn predict_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn customer_json() -> Value {
        serde_json::to_value(CustomerRecord::default()).unwrap()
    }

    #[tokio::test]
    async fn test_health_lists_models() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();

        let (status, body) = send(app(), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "API is running");
        assert_eq!(body["default_model"], "rf");
        let mut models: Vec<String> = body["available_models"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m.as_str().unwrap().to_string())
            .collect();
        models.sort();
        assert_eq!(models, vec!["knn", "logreg", "rf"]);
    }

    #[tokio::test]
    async fn test_predict_month_to_month_on_rf() {
        let mut body = customer_json();
        body["tenure"] = json!(12);
        body["MonthlyCharges"] = json!(70.0);
        body["TotalCharges"] = json!(900.0);
        body["Contract"] = json!("Month-to-month");

        let (status, body) = send(app(), predict_request("/predict?model=rf", body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["model_used"], "rf");
        let prediction = body["prediction"].as_u64().unwrap();
        let expected = match prediction {
            1 => "Likely to Leave",
            0 => "Likely to Stay",
            other => panic!("prediction out of range: {}", other),
        };
        assert_eq!(body["message"], expected);
        let p = body["churn_probability"].as_f64().unwrap();
        assert!((0.0..=1.0).contains(&p));
    }

    #[tokio::test]
    async fn test_predict_every_model() {
        for model in ["knn", "logreg", "rf"] {
            let uri = format!("/predict?model={}", model);
            let (status, body) = send(app(), predict_request(&uri, customer_json())).await;

            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["model_used"], model);
            assert!(body["prediction"] == 0 || body["prediction"] == 1);
        }
    }

    #[tokio::test]
    async fn test_predict_defaults_to_rf() {
        let (status, body) = send(app(), predict_request("/predict", customer_json())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["model_used"], "rf");
    }

    #[tokio::test]
    async fn test_unknown_model_is_structured_success() {
        let (status, body) =
            send(app(), predict_request("/predict?model=svm", customer_json())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["error"], "Invalid model 'svm'. Choose from knn, logreg, rf.");
        assert_eq!(body["available_models"], json!(["knn", "logreg", "rf"]));
        assert!(body.get("prediction").is_none());
    }

    #[tokio::test]
    async fn test_missing_field_rejected_before_inference() {
        let (registry, calls) = counting_registry(ChurnLabel::Leave, Some(0.8));
        let app = create_router(AppState::new(registry));
        let mut body = customer_json();
        body.as_object_mut().unwrap().remove("tenure");

        let (status, body) = send(app, predict_request("/predict?model=knn", body)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"]["message"].as_str().unwrap().contains("tenure"));
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_wrong_type_rejected() {
        let mut body = customer_json();
        body["MonthlyCharges"] = json!("seventy");

        let (status, _) = send(app(), predict_request("/predict", body)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_negative_charges_rejected() {
        let mut body = customer_json();
        body["TotalCharges"] = json!(-10.0);

        let (status, body) = send(app(), predict_request("/predict", body)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "validation_error");
    }

    #[tokio::test]
    async fn test_missing_probability_serializes_as_null() {
        let (registry, _) = counting_registry(ChurnLabel::Stay, None);
        let app = create_router(AppState::new(registry));

        let (status, body) = send(app, predict_request("/predict", customer_json())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["prediction"], 0);
        assert_eq!(body["message"], "Likely to Stay");
        assert!(body["churn_probability"].is_null());
    }
}
