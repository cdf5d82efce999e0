use super::inputs::{CalculatorInputs, Mode};
use super::payout::CalculationResults;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A saved calculation.
///
/// Entries are snapshots: the inputs and results are copied in at creation
/// and never change afterwards. Fields are only readable, so an entry can be
/// stored, listed or dropped, but not edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    id: Uuid,
    timestamp: DateTime<Utc>,
    #[serde(default)]
    mode: Mode,
    inputs: CalculatorInputs,
    #[serde(flatten)]
    results: CalculationResults,
}

impl HistoryEntry {
    pub fn new(mode: Mode, inputs: CalculatorInputs, results: CalculationResults) -> Self {
        Self::with_timestamp(Utc::now(), mode, inputs, results)
    }

    pub fn with_timestamp(
        timestamp: DateTime<Utc>,
        mode: Mode,
        inputs: CalculatorInputs,
        results: CalculationResults,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            mode,
            inputs,
            results,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn inputs(&self) -> &CalculatorInputs {
        &self.inputs
    }

    pub fn results(&self) -> &CalculationResults {
        &self.results
    }
}
