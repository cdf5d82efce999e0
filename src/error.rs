use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum PayoutError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Storage error: {0}")]
    StorageError(String),
    #[error("History entry {0} not found")]
    EntryNotFound(Uuid),
    #[error("Nothing to save: gross payout is zero")]
    NothingToSave,
}

pub type Result<T> = std::result::Result<T, PayoutError>;
