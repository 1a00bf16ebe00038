//! History repository trait

use async_trait::async_trait;

use super::HistoryRecord;
use crate::domain::error::DomainError;

#[cfg(test)]
use mockall::automock;

/// Append-only log of predictions
#[cfg_attr(test, automock)]
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Appends one record to the end of the log, creating the log if needed
    async fn append(&self, record: HistoryRecord) -> Result<(), DomainError>;

    /// Reads every record in log order. An absent log is an empty history.
    async fn load(&self) -> Result<Vec<HistoryRecord>, DomainError>;

    /// Deletes the whole log. Clearing an absent log succeeds.
    async fn clear(&self) -> Result<(), DomainError>;
}
