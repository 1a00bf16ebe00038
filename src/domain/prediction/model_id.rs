//! Model identifiers

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Identifier of one of the pre-trained churn models
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ModelId {
    Knn,
    Logreg,
    #[default]
    Rf,
}

impl ModelId {
    pub const ALL: [ModelId; 3] = [Self::Knn, Self::Logreg, Self::Rf];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Knn => "knn",
            Self::Logreg => "logreg",
            Self::Rf => "rf",
        }
    }

    /// Display name used by the dashboard model selector
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Knn => "KNN",
            Self::Logreg => "Logistic Regression",
            Self::Rf => "Random Forest (Recommended)",
        }
    }

    /// File name of the serialized artifact inside the model directory
    pub fn artifact_file(&self) -> String {
        format!("churn_{}_model.json", self.as_str())
    }

    pub fn names() -> Vec<String> {
        Self::ALL.iter().map(|id| id.as_str().to_string()).collect()
    }
}

impl FromStr for ModelId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| DomainError::invalid_model(s, Self::names()))
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
