//! Churn Predictor
//!
//! Serves pre-trained churn models over HTTP and provides a dashboard that
//! collects customer attributes, requests predictions and charts the
//! prediction history.

pub mod api;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod domain;
pub mod infrastructure;

#[cfg(test)]
mod testing;

pub use config::AppConfig;
