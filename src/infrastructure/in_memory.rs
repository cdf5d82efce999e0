use crate::domain::history::HistoryEntry;
use crate::domain::ports::{HistoryStore, Session, SessionStore};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A thread-safe in-memory history log.
///
/// Entries live in a `Vec` kept newest first. Nothing survives the process,
/// which makes it the store of choice for tests and `--ephemeral` runs.
#[derive(Default, Clone)]
pub struct InMemoryHistoryStore {
    entries: Arc<RwLock<Vec<HistoryEntry>>>,
}

impl InMemoryHistoryStore {
    /// Creates a new, empty in-memory history store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn append(&self, entry: HistoryEntry) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(0, entry);
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> Result<bool> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|entry| entry.id() != id);
        Ok(entries.len() != before)
    }

    async fn clear(&self) -> Result<()> {
        self.entries.write().await.clear();
        Ok(())
    }

    async fn entries(&self) -> Result<Vec<HistoryEntry>> {
        let entries = self.entries.read().await;
        Ok(entries.clone())
    }
}

/// In-memory slot for the last session.
#[derive(Default, Clone)]
pub struct InMemorySessionStore {
    session: Arc<RwLock<Option<Session>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self) -> Result<Option<Session>> {
        Ok(self.session.read().await.clone())
    }

    async fn save(&self, session: Session) -> Result<()> {
        *self.session.write().await = Some(session);
        Ok(())
    }
}
