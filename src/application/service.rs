use crate::domain::history::HistoryEntry;
use crate::domain::inputs::{CalculatorInputs, Mode};
use crate::domain::payout::{self, CalculationResults};
use crate::domain::ports::{HistoryStoreBox, Session, SessionStoreBox};
use crate::error::{PayoutError, Result};
use uuid::Uuid;

/// The main entry point for the calculator application.
///
/// `PayoutService` runs the payout formula and owns the storage backends
/// for the saved history and the last session. The formula itself is pure;
/// only saving, deleting and session handling touch the stores.
pub struct PayoutService {
    history_store: HistoryStoreBox,
    session_store: SessionStoreBox,
}

impl PayoutService {
    /// Creates a new `PayoutService` instance.
    ///
    /// # Arguments
    ///
    /// * `history_store` - The store for saved calculations.
    /// * `session_store` - The store for the last used inputs and mode.
    pub fn new(history_store: HistoryStoreBox, session_store: SessionStoreBox) -> Self {
        Self {
            history_store,
            session_store,
        }
    }

    pub fn calculate(&self, mode: Mode, inputs: &CalculatorInputs) -> CalculationResults {
        payout::calculate(mode, inputs)
    }

    /// Stores a snapshot of `inputs` and `results` at the front of the history.
    ///
    /// Results without any gross income are rejected.
    pub async fn save(
        &self,
        mode: Mode,
        inputs: CalculatorInputs,
        results: CalculationResults,
    ) -> Result<HistoryEntry> {
        if !results.can_save() {
            return Err(PayoutError::NothingToSave);
        }

        let entry = HistoryEntry::new(mode, inputs, results);
        self.history_store.append(entry.clone()).await?;
        log::info!("saved history entry {}", entry.id());
        Ok(entry)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if self.history_store.remove(id).await? {
            log::info!("deleted history entry {id}");
            Ok(())
        } else {
            Err(PayoutError::EntryNotFound(id))
        }
    }

    pub async fn clear_history(&self) -> Result<()> {
        self.history_store.clear().await?;
        log::info!("cleared history");
        Ok(())
    }

    /// All saved entries, newest first.
    pub async fn history(&self) -> Result<Vec<HistoryEntry>> {
        self.history_store.entries().await
    }

    /// The last stored session, or the defaults on first use.
    pub async fn load_session(&self) -> Result<Session> {
        let session = self.session_store.load().await?;
        if session.is_none() {
            log::debug!("no stored session, starting from defaults");
        }
        Ok(session.unwrap_or_default())
    }

    pub async fn store_session(&self, session: Session) -> Result<()> {
        self.session_store.save(session).await
    }
}
