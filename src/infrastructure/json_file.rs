use crate::domain::history::HistoryEntry;
use crate::domain::ports::{HistoryStore, Session, SessionStore};
use crate::error::{PayoutError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// On-disk layout of the store file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    #[serde(default)]
    session: Option<Session>,
    #[serde(default)]
    history: Vec<HistoryEntry>,
}

/// A persistent store that keeps session and history in one JSON file.
///
/// Every operation re-reads the file, so separate invocations of the CLI
/// see each other's writes. Writes go to a temporary file in the same
/// directory which is then renamed over the target.
///
/// Cloning shares the same lock, so one handle can back both ports.
#[derive(Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl JsonFileStore {
    /// Uses the file at `path`. It does not need to exist yet.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Document> {
        match std::fs::read(&self.path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Document::default()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Document::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, document: &Document) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        let mut file = tempfile::NamedTempFile::new_in(&dir)?;
        serde_json::to_writer_pretty(&mut file, document)?;
        file.write_all(b"\n")?;
        file.persist(&self.path)
            .map_err(|e| PayoutError::IoError(e.error))?;
        log::debug!("wrote store file {}", self.path.display());
        Ok(())
    }

    async fn update<T>(&self, f: impl FnOnce(&mut Document) -> T) -> Result<T> {
        let _guard = self.lock.lock().await;
        let mut document = self.read()?;
        let out = f(&mut document);
        self.write(&document)?;
        Ok(out)
    }
}

#[async_trait]
impl HistoryStore for JsonFileStore {
    async fn append(&self, entry: HistoryEntry) -> Result<()> {
        self.update(|doc| doc.history.insert(0, entry)).await
    }

    async fn remove(&self, id: Uuid) -> Result<bool> {
        self.update(|doc| {
            let before = doc.history.len();
            doc.history.retain(|entry| entry.id() != id);
            doc.history.len() != before
        })
        .await
    }

    async fn clear(&self) -> Result<()> {
        self.update(|doc| doc.history.clear()).await
    }

    async fn entries(&self) -> Result<Vec<HistoryEntry>> {
        let _guard = self.lock.lock().await;
        Ok(self.read()?.history)
    }
}

#[async_trait]
impl SessionStore for JsonFileStore {
    async fn load(&self) -> Result<Option<Session>> {
        let _guard = self.lock.lock().await;
        Ok(self.read()?.session)
    }

    async fn save(&self, session: Session) -> Result<()> {
        self.update(|doc| doc.session = Some(session)).await
    }
}
