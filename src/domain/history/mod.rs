//! History domain - persisted record of every prediction made

mod entity;
mod repository;

pub use entity::HistoryRecord;
pub use repository::HistoryRepository;

#[cfg(test)]
pub use repository::MockHistoryRepository;
