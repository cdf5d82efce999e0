use crate::domain::history::HistoryEntry;
use crate::domain::ports::{HistoryStore, Session, SessionStore};
use crate::error::{PayoutError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, IteratorMode, Options};
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

/// Column Family for saved calculations.
pub const CF_HISTORY: &str = "history";
/// Column Family for the last session.
pub const CF_SESSION: &str = "session";

const SESSION_KEY: &[u8] = b"current";

/// A persistent store implementation using RocksDB.
///
/// History keys are the entry timestamp (big-endian milliseconds) followed
/// by the entry id, so iterating from the end yields newest first.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
}

impl From<rocksdb::Error> for PayoutError {
    fn from(e: rocksdb::Error) -> Self {
        PayoutError::StorageError(e.to_string())
    }
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the required column families ("history" and "session") exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_history = ColumnFamilyDescriptor::new(CF_HISTORY, Options::default());
        let cf_session = ColumnFamilyDescriptor::new(CF_SESSION, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_history, cf_session])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn cf(&self, name: &str) -> Result<&ColumnFamily> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| PayoutError::StorageError(format!("{name} column family not found")))
    }

    fn history_key(entry: &HistoryEntry) -> Vec<u8> {
        let millis = entry.timestamp().timestamp_millis().max(0) as u64;
        let mut key = millis.to_be_bytes().to_vec();
        key.extend_from_slice(entry.id().as_bytes());
        key
    }

    fn history_keys(&self) -> Result<Vec<(Box<[u8]>, HistoryEntry)>> {
        let cf = self.cf(CF_HISTORY)?;
        let mut out = Vec::new();
        for item in self.db.iterator_cf(cf, IteratorMode::End) {
            let (key, value) = item?;
            let entry: HistoryEntry = serde_json::from_slice(&value)?;
            out.push((key, entry));
        }
        Ok(out)
    }
}

#[async_trait]
impl HistoryStore for RocksDBStore {
    async fn append(&self, entry: HistoryEntry) -> Result<()> {
        let cf = self.cf(CF_HISTORY)?;
        let value = serde_json::to_vec(&entry)?;
        self.db.put_cf(cf, Self::history_key(&entry), value)?;
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> Result<bool> {
        let found = self
            .history_keys()?
            .into_iter()
            .find(|(_, entry)| entry.id() == id);

        match found {
            Some((key, _)) => {
                self.db.delete_cf(self.cf(CF_HISTORY)?, key)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn clear(&self) -> Result<()> {
        let cf = self.cf(CF_HISTORY)?;
        for (key, _) in self.history_keys()? {
            self.db.delete_cf(cf, key)?;
        }
        Ok(())
    }

    async fn entries(&self) -> Result<Vec<HistoryEntry>> {
        Ok(self
            .history_keys()?
            .into_iter()
            .map(|(_, entry)| entry)
            .collect())
    }
}

#[async_trait]
impl SessionStore for RocksDBStore {
    async fn load(&self) -> Result<Option<Session>> {
        let cf = self.cf(CF_SESSION)?;
        match self.db.get_cf(cf, SESSION_KEY)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, session: Session) -> Result<()> {
        let cf = self.cf(CF_SESSION)?;
        let value = serde_json::to_vec(&session)?;
        self.db.put_cf(cf, SESSION_KEY, value)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::inputs::{CalculatorInputs, Mode};
    use crate::domain::payout::compute_forward;
    use chrono::{Duration, Utc};
    use tempfile::tempdir;

    fn entry_at(offset_secs: i64) -> HistoryEntry {
        let inputs = CalculatorInputs::default();
        let results = compute_forward(&inputs);
        let at = Utc::now() + Duration::seconds(offset_secs);
        HistoryEntry::with_timestamp(at, Mode::Payout, inputs, results)
    }

    #[tokio::test]
    async fn test_rocksdb_open_cf() {
        let dir = tempdir().unwrap();
        let store = RocksDBStore::open(dir.path()).expect("Failed to open RocksDB");

        assert!(store.db.cf_handle(CF_HISTORY).is_some());
        assert!(store.db.cf_handle(CF_SESSION).is_some());
    }

    #[tokio::test]
    async fn test_rocksdb_history_store() {
        let dir = tempdir().unwrap();
        let store = RocksDBStore::open(dir.path()).unwrap();
        let older = entry_at(-60);
        let newer = entry_at(0);

        store.append(older.clone()).await.unwrap();
        store.append(newer.clone()).await.unwrap();
        assert_eq!(
            store.entries().await.unwrap(),
            vec![newer.clone(), older.clone()]
        );

        assert!(store.remove(newer.id()).await.unwrap());
        assert!(!store.remove(newer.id()).await.unwrap());
        assert_eq!(store.entries().await.unwrap(), vec![older]);

        store.clear().await.unwrap();
        assert!(store.entries().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rocksdb_session_store() {
        let dir = tempdir().unwrap();
        let store = RocksDBStore::open(dir.path()).unwrap();
        assert!(store.load().await.unwrap().is_none());

        let session = Session {
            mode: Mode::Target,
            inputs: CalculatorInputs::default(),
        };
        store.save(session.clone()).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(session));
    }
}
