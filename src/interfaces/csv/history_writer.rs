use crate::domain::history::HistoryEntry;
use crate::error::Result;
use crate::interfaces::display::to_fixed;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::io::Write;

/// Column headers of the export, in order.
pub const HEADERS: [&str; 16] = [
    "Date",
    "Currency",
    "Local Currency",
    "Hourly Rate",
    "Hours",
    "Gross",
    "Service Fee %",
    "Service Fee Amt",
    "VAT %",
    "VAT Amt",
    "Withdrawal Fee",
    "Net (Original)",
    "Exchange Rate",
    "Net (Local)",
    "Target Net",
    "Hours Required",
];

/// Suggested file name for an export made on `date`.
pub fn default_file_name(date: NaiveDate) -> String {
    format!("payout_history_{}.csv", date.format("%Y-%m-%d"))
}

/// Export file name for the UTC calendar day of `now`, the same day the
/// Date column uses.
pub fn default_file_name_at<Tz: TimeZone>(now: &DateTime<Tz>) -> String {
    default_file_name(now.with_timezone(&Utc).date_naive())
}

/// Writes saved history entries as CSV.
///
/// Amounts are fixed to two decimals and the exchange rate to four. Optional
/// values that are absent become empty cells.
pub struct HistoryWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> HistoryWriter<W> {
    pub fn new(sink: W) -> Self {
        let writer = csv::WriterBuilder::new().from_writer(sink);
        Self { writer }
    }

    fn row(entry: &HistoryEntry) -> [String; 16] {
        let inputs = entry.inputs();
        let results = entry.results();
        [
            entry.timestamp().format("%Y-%m-%d").to_string(),
            inputs.currency.or("USD").to_string(),
            inputs.local_currency.or("N/A").to_string(),
            to_fixed(inputs.hourly_rate, 2),
            to_fixed(inputs.hours_worked, 2),
            to_fixed(results.gross, 2),
            to_fixed(inputs.service_fee_rate, 2),
            to_fixed(results.service_fee_amount, 2),
            to_fixed(inputs.vat_rate, 2),
            to_fixed(results.vat_amount, 2),
            to_fixed(results.withdrawal_fee, 2),
            to_fixed(results.net, 2),
            to_fixed(inputs.exchange_rate, 4),
            to_fixed(results.net_in_local_currency, 2),
            inputs
                .target_net
                .map(|v| to_fixed(v, 2))
                .unwrap_or_default(),
            results
                .hours_required
                .map(|v| to_fixed(v, 2))
                .unwrap_or_default(),
        ]
    }

    /// Writes the header and one row per entry, in the given order.
    ///
    /// Nothing at all is written for an empty history. Returns the number
    /// of rows written.
    pub fn write_entries(&mut self, entries: &[HistoryEntry]) -> Result<usize> {
        if entries.is_empty() {
            return Ok(0);
        }

        self.writer.write_record(HEADERS)?;
        for entry in entries {
            self.writer.write_record(Self::row(entry))?;
        }
        self.writer.flush()?;
        Ok(entries.len())
    }
}
