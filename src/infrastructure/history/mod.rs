//! Prediction history persistence

mod csv_repository;

pub use csv_repository::CsvHistoryRepository;
