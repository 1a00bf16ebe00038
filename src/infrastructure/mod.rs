//! Infrastructure layer - Model loading, persistence and external service access

pub mod client;
pub mod history;
pub mod logging;
pub mod models;
pub mod observability;
pub mod services;
