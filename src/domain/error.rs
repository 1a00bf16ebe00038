use thiserror::Error;

/// Core domain errors
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid model '{requested}'. Choose from {}.", available.join(", "))]
    InvalidModel {
        requested: String,
        available: Vec<String>,
    },

    #[error("Artifact error: {path} - {message}")]
    Artifact { path: String, message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Service unavailable: {message}")]
    ServiceUnavailable { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn invalid_model(requested: impl Into<String>, available: Vec<String>) -> Self {
        Self::InvalidModel {
            requested: requested.into(),
            available,
        }
    }

    pub fn artifact(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Artifact {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let error = DomainError::validation("Invalid input");
        assert_eq!(error.to_string(), "Validation error: Invalid input");
    }

    #[test]
    fn test_invalid_model_error_lists_choices() {
        let error = DomainError::invalid_model(
            "svm",
            vec!["knn".to_string(), "logreg".to_string(), "rf".to_string()],
        );
        assert_eq!(
            error.to_string(),
            "Invalid model 'svm'. Choose from knn, logreg, rf."
        );
    }

    #[test]
    fn test_artifact_error() {
        let error = DomainError::artifact("model/churn_rf_model.json", "file not found");
        assert_eq!(
            error.to_string(),
            "Artifact error: model/churn_rf_model.json - file not found"
        );
    }
}
