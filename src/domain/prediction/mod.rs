//! Prediction domain - model identifiers, predictors and their results

mod client;
mod model_id;
mod predictor;
mod result;

pub use client::{PredictionClient, ServiceHealth};
pub use model_id::ModelId;
pub use predictor::Predictor;
pub use result::{round_probability, ChurnLabel, PredictionResult};

#[cfg(test)]
pub use client::MockPredictionClient;
