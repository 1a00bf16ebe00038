//! Domain layer - Core business logic and entities

pub mod customer;
pub mod error;
pub mod history;
pub mod prediction;

pub use customer::{CustomerField, CustomerRecord, FieldKind, FieldValue};
pub use error::DomainError;
pub use history::{HistoryRecord, HistoryRepository};
pub use prediction::{
    ChurnLabel, ModelId, PredictionClient, PredictionResult, Predictor, ServiceHealth,
};

#[cfg(test)]
pub use history::MockHistoryRepository;
#[cfg(test)]
pub use prediction::MockPredictionClient;
