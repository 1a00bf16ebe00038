//! Registry of the loaded churn models

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use super::pipeline::{ModelArtifact, Pipeline};
use crate::domain::{DomainError, ModelId, Predictor};

/// Immutable mapping from every [`ModelId`] to its predictor.
/// Built once at startup and shared read-only with the request handlers.
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    models: BTreeMap<ModelId, Arc<dyn Predictor>>,
    default_model: ModelId,
}

impl ModelRegistry {
    /// Load `churn_<id>_model.json` for every model id from `dir`.
    /// Fails on the first missing or invalid artifact.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, DomainError> {
        let dir = dir.as_ref();
        let mut models: BTreeMap<ModelId, Arc<dyn Predictor>> = BTreeMap::new();

        for id in ModelId::ALL {
            let pipeline = load_artifact(&dir.join(id.artifact_file()))?;
            info!(model = %id, artifact = %pipeline.name(), "Loaded model artifact");
            models.insert(id, Arc::new(pipeline));
        }

        Self::from_predictors(models)
    }

    /// Build a registry from already constructed predictors. Every model id
    /// must be present.
    pub fn from_predictors(
        models: BTreeMap<ModelId, Arc<dyn Predictor>>,
    ) -> Result<Self, DomainError> {
        if let Some(missing) = ModelId::ALL.iter().find(|id| !models.contains_key(*id)) {
            return Err(DomainError::configuration(format!(
                "No predictor registered for model '{}'",
                missing
            )));
        }

        Ok(Self {
            models,
            default_model: ModelId::default(),
        })
    }

    /// Resolve a requested model name, falling back to the default model
    pub fn resolve(
        &self,
        requested: Option<&str>,
    ) -> Result<(ModelId, &Arc<dyn Predictor>), DomainError> {
        let id = match requested {
            Some(name) => name.parse::<ModelId>()?,
            None => self.default_model,
        };

        self.models
            .get(&id)
            .map(|predictor| (id, predictor))
            .ok_or_else(|| DomainError::invalid_model(id.as_str(), ModelId::names()))
    }

    pub fn available_models(&self) -> Vec<ModelId> {
        self.models.keys().copied().collect()
    }

    pub fn default_model(&self) -> ModelId {
        self.default_model
    }
}

fn load_artifact(path: &Path) -> Result<Pipeline, DomainError> {
    let display = path.display().to_string();

    let contents =
        fs::read_to_string(path).map_err(|e| DomainError::artifact(&display, e.to_string()))?;

    let artifact: ModelArtifact = serde_json::from_str(&contents)
        .map_err(|e| DomainError::artifact(&display, format!("Malformed artifact: {}", e)))?;

    Pipeline::compile(artifact).map_err(|e| DomainError::artifact(&display, e.to_string()))
}
