use super::history::HistoryEntry;
use super::inputs::{CalculatorInputs, Mode};
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The state that carries over between runs: the last inputs and mode.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Session {
    pub mode: Mode,
    pub inputs: CalculatorInputs,
}

/// Append-only log of saved calculations.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Adds an entry in front of the existing ones.
    async fn append(&self, entry: HistoryEntry) -> Result<()>;
    /// Removes the entry with `id`, returning whether it existed.
    async fn remove(&self, id: Uuid) -> Result<bool>;
    async fn clear(&self) -> Result<()>;
    /// All entries, newest first.
    async fn entries(&self) -> Result<Vec<HistoryEntry>>;
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self) -> Result<Option<Session>>;
    async fn save(&self, session: Session) -> Result<()>;
}

pub type HistoryStoreBox = Box<dyn HistoryStore>;
pub type SessionStoreBox = Box<dyn SessionStore>;
