//! Per-browser dashboard state and its transitions

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{HistoryRecord, ModelId};

/// Which of the two dashboard pages is shown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Page {
    #[default]
    Input,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// One-shot message shown on the next rendered page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum SessionEvent {
    PredictionSucceeded(HistoryRecord),
    PredictionFailed(Notice),
    NewPrediction,
    ClearAll,
}

#[derive(Debug, Clone, Default)]
pub struct ClientSession {
    pub page: Page,
    pub last_prediction: Option<HistoryRecord>,
    pub selected_model: ModelId,
    pub notice: Option<Notice>,
}

impl ClientSession {
    /// Apply an event and return the page to show next
    pub fn apply(&mut self, event: SessionEvent) -> Page {
        match event {
            SessionEvent::PredictionSucceeded(record) => {
                self.selected_model = record.model;
                self.last_prediction = Some(record);
                self.page = Page::Results;
            }
            SessionEvent::PredictionFailed(notice) => {
                self.notice = Some(notice);
                self.page = Page::Input;
            }
            SessionEvent::NewPrediction => {
                self.page = Page::Input;
            }
            SessionEvent::ClearAll => {
                self.last_prediction = None;
                self.page = Page::Input;
            }
        }

        self.page
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }
}

/// Sessions idle for longer than this are dropped
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(3600);

#[derive(Debug)]
struct SessionEntry {
    session: ClientSession,
    last_seen: Instant,
}

impl SessionEntry {
    fn is_expired(&self, idle_timeout: Duration) -> bool {
        self.last_seen.elapsed() >= idle_timeout
    }
}

/// In-memory sessions keyed by the session cookie.
///
/// A session is only stored once something changes it; rendering an unknown
/// session shows a fresh one without storing it. Idle sessions are swept on
/// every write.
#[derive(Debug)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, SessionEntry>>,
    idle_timeout: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_idle_timeout(DEFAULT_IDLE_TIMEOUT)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout,
        }
    }

    /// Copy of the session, or a fresh one if the id is unknown or expired
    pub async fn snapshot(&self, id: Uuid) -> ClientSession {
        self.sessions
            .read()
            .await
            .get(&id)
            .filter(|entry| !entry.is_expired(self.idle_timeout))
            .map(|entry| entry.session.clone())
            .unwrap_or_default()
    }

    /// Session to render plus its pending notice, which is consumed.
    /// Unknown ids are not stored.
    pub async fn take_for_render(&self, id: Uuid) -> (ClientSession, Option<Notice>) {
        let mut sessions = self.sessions.write().await;

        match sessions.get_mut(&id) {
            Some(entry) if !entry.is_expired(self.idle_timeout) => {
                entry.last_seen = Instant::now();
                let notice = entry.session.take_notice();
                (entry.session.clone(), notice)
            }
            Some(_) => {
                sessions.remove(&id);
                (ClientSession::default(), None)
            }
            None => (ClientSession::default(), None),
        }
    }

    /// Mutate a session in place, creating it first if needed
    pub async fn update<F, R>(&self, id: Uuid, f: F) -> R
    where
        F: FnOnce(&mut ClientSession) -> R,
    {
        let mut sessions = self.sessions.write().await;
        let idle_timeout = self.idle_timeout;
        sessions.retain(|_, entry| !entry.is_expired(idle_timeout));

        let entry = sessions.entry(id).or_insert_with(|| SessionEntry {
            session: ClientSession::default(),
            last_seen: Instant::now(),
        });
        entry.last_seen = Instant::now();

        f(&mut entry.session)
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
