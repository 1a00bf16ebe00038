//! Dashboard state

use std::sync::Arc;

use super::session::SessionStore;
use crate::domain::{HistoryRepository, PredictionClient};

/// Shared by every dashboard request; cloning is cheap
#[derive(Clone)]
pub struct DashboardState {
    pub client: Arc<dyn PredictionClient>,
    pub history: Arc<dyn HistoryRepository>,
    pub sessions: Arc<SessionStore>,
    /// Shown in the sidebar
    pub api_url: String,
}

impl DashboardState {
    pub fn new(
        client: Arc<dyn PredictionClient>,
        history: Arc<dyn HistoryRepository>,
        api_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            history,
            sessions: Arc::new(SessionStore::new()),
            api_url: api_url.into(),
        }
    }

    pub fn with_sessions(mut self, sessions: SessionStore) -> Self {
        self.sessions = Arc::new(sessions);
        self
    }
}
