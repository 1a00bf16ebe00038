//! Prediction outcome types

use std::fmt;

use serde::{Deserialize, Serialize};

use super::model_id::ModelId;

/// Binary churn outcome, serialized as `0` or `1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ChurnLabel {
    Stay,
    Leave,
}

impl ChurnLabel {
    pub fn as_u8(&self) -> u8 {
        match self {
            Self::Stay => 0,
            Self::Leave => 1,
        }
    }

    /// Fixed message shown for a label
    pub fn message(&self) -> &'static str {
        match self {
            Self::Stay => "Likely to Stay",
            Self::Leave => "Likely to Leave",
        }
    }
}

impl From<ChurnLabel> for u8 {
    fn from(label: ChurnLabel) -> Self {
        label.as_u8()
    }
}

impl TryFrom<u8> for ChurnLabel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Stay),
            1 => Ok(Self::Leave),
            other => Err(format!("prediction must be 0 or 1, got {}", other)),
        }
    }
}

impl fmt::Display for ChurnLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// Output of one inference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub model_used: ModelId,
    pub prediction: ChurnLabel,
    pub message: String,
    pub churn_probability: Option<f64>,
}

impl PredictionResult {
    pub fn new(model_used: ModelId, prediction: ChurnLabel, churn_probability: Option<f64>) -> Self {
        Self {
            model_used,
            prediction,
            message: prediction.message().to_string(),
            churn_probability: churn_probability.map(round_probability),
        }
    }
}

/// Round a probability to 4 decimal places
pub fn round_probability(probability: f64) -> f64 {
    (probability * 10_000.0).round() / 10_000.0
}
