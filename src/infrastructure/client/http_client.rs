//! reqwest-backed client for the prediction service

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::domain::{
    CustomerRecord, DomainError, ModelId, PredictionClient, PredictionResult, ServiceHealth,
};

/// Successful predict responses carry either a result or an error payload
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PredictReply {
    Prediction(PredictionResult),
    Rejected { error: serde_json::Value },
}

/// Prediction service client over HTTP
#[derive(Debug, Clone)]
pub struct HttpPredictionClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPredictionClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                DomainError::configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn predict_url(&self) -> String {
        format!("{}/predict", self.base_url)
    }

    fn health_url(&self) -> String {
        format!("{}/", self.base_url)
    }
}

#[async_trait]
impl PredictionClient for HttpPredictionClient {
    async fn predict(
        &self,
        record: CustomerRecord,
        model: ModelId,
    ) -> Result<PredictionResult, DomainError> {
        let response = self
            .client
            .post(self.predict_url())
            .query(&[("model", model.as_str())])
            .json(&record)
            .send()
            .await
            .map_err(|e| DomainError::service_unavailable(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %error_body, "Prediction request rejected");
            return Err(DomainError::service_unavailable(format!(
                "HTTP {}: {}",
                status, error_body
            )));
        }

        let reply: PredictReply = response.json().await.map_err(|e| {
            DomainError::service_unavailable(format!("Failed to parse response: {}", e))
        })?;

        match reply {
            PredictReply::Prediction(result) => Ok(result),
            PredictReply::Rejected { error } => {
                warn!(error = %error, "Prediction service returned an error payload");
                Err(DomainError::service_unavailable(match error {
                    serde_json::Value::String(message) => message,
                    other => other.to_string(),
                }))
            }
        }
    }

    async fn health(&self) -> Result<ServiceHealth, DomainError> {
        let response = self
            .client
            .get(self.health_url())
            .send()
            .await
            .map_err(|e| DomainError::service_unavailable(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(DomainError::service_unavailable(format!(
                "HTTP {}",
                response.status()
            )));
        }

        response.json().await.map_err(|e| {
            DomainError::service_unavailable(format!("Failed to parse response: {}", e))
        })
    }
}
