//! Human-readable rendering of amounts, results and history.

use crate::domain::history::HistoryEntry;
use crate::domain::inputs::{CalculatorInputs, CurrencyCode, Mode};
use crate::domain::payout::{CalculationResults, net_share};
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;

/// Rounds half away from zero to exactly `dp` fraction digits.
pub fn to_fixed(value: Decimal, dp: u32) -> String {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(dp);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded.to_string()
}

fn currency_prefix(code: &str) -> String {
    match code {
        "USD" => "$".to_string(),
        "EUR" => "€".to_string(),
        "GBP" => "£".to_string(),
        "CAD" => "CA$".to_string(),
        "AUD" => "A$".to_string(),
        "INR" => "₹".to_string(),
        "JPY" => "¥".to_string(),
        "CNY" => "CN¥".to_string(),
        other => format!("{other} "),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Formats `amount` the way an en-US locale shows currency: symbol or code
/// prefix, thousands separators and two fraction digits.
///
/// A blank currency code is shown as USD.
pub fn format_currency(amount: Decimal, currency: &CurrencyCode) -> String {
    let fixed = to_fixed(amount, 2);
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    format!(
        "{sign}{}{}.{frac_part}",
        currency_prefix(currency.or("USD")),
        group_thousands(int_part)
    )
}

/// The result panel for one calculation.
pub struct PayoutSummary<'a> {
    pub mode: Mode,
    pub inputs: &'a CalculatorInputs,
    pub results: &'a CalculationResults,
}

impl PayoutSummary<'_> {
    fn money(&self, amount: Decimal) -> String {
        format_currency(amount, &self.inputs.currency)
    }

    fn show_local(&self) -> bool {
        self.results.net_in_local_currency != self.results.net
            && !self.inputs.local_currency.is_empty()
    }

    /// Why the inverse found no hours, or `None` when nothing was needed in
    /// the first place (a zero target with no withdrawal fee).
    fn unreachable_reason(&self) -> Option<&'static str> {
        let inputs = self.inputs;
        if inputs.hourly_rate <= Decimal::ZERO {
            return Some("the hourly rate is not positive");
        }
        if net_share(inputs) <= Decimal::ZERO {
            return Some("fees consume the whole gross");
        }
        match inputs
            .target_net
            .unwrap_or_default()
            .checked_add(inputs.withdrawal_fee)
        {
            Some(needed) if needed.is_zero() => None,
            _ => Some("the amounts are too large to compute"),
        }
    }
}

impl fmt::Display for PayoutSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.results;
        match self.mode {
            Mode::Payout => {
                writeln!(f, "Payout Summary")?;
                writeln!(f, "  {:<28}{}", "Estimated Net", self.money(r.net))?;
                if self.show_local() {
                    writeln!(
                        f,
                        "  {:<28}{}",
                        format!("Net ({})", self.inputs.local_currency),
                        format_currency(r.net_in_local_currency, &self.inputs.local_currency)
                    )?;
                }
                writeln!(f)?;
                writeln!(f, "  {:<28}{}", "Gross Income", self.money(r.gross))?;
            }
            Mode::Target => {
                writeln!(f, "Target Analysis")?;
                let unreachable = if r.is_unreachable() {
                    self.unreachable_reason()
                } else {
                    None
                };
                if let Some(reason) = unreachable {
                    writeln!(f, "  Target unreachable: {reason}.")?;
                    return Ok(());
                }
                let hours = r.hours_required.unwrap_or_default();
                let per_day = r.hours_per_day.unwrap_or_default();
                writeln!(f, "  {:<28}{}", "Total Hours", to_fixed(hours, 2))?;
                writeln!(f, "  {:<28}{}", "Hours / Day", to_fixed(per_day, 2))?;
                writeln!(f)?;
                writeln!(f, "  {:<28}{}", "Required Gross", self.money(r.gross))?;
                writeln!(f, "  {:<28}{}", "Target Net", self.money(r.net))?;
            }
        }
        writeln!(f, "  {:<28}- {}", "Service Fee", self.money(r.service_fee_amount))?;
        writeln!(f, "  {:<28}- {}", "VAT on Fee", self.money(r.vat_amount))?;
        writeln!(f, "  {:<28}- {}", "Withdrawal Fee", self.money(r.withdrawal_fee))?;
        write!(f, "  {:<28}{}", "Subtotal (Before Withdraw)", self.money(r.subtotal))
    }
}

/// Saved entries as a plain-text table.
pub struct HistoryTable<'a>(pub &'a [HistoryEntry]);

impl fmt::Display for HistoryTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "No history yet. Save a calculation to see it here.");
        }

        writeln!(f, "History ({})", self.0.len())?;
        write!(
            f,
            "{:<36}  {:<10}  {:<6}  {:>16}  {:>16}  {:>16}",
            "ID", "Date", "Mode", "Gross", "Deductions", "Net"
        )?;
        for entry in self.0 {
            let currency = &entry.inputs().currency;
            let results = entry.results();
            write!(
                f,
                "\n{:<36}  {:<10}  {:<6}  {:>16}  {:>16}  {:>16}",
                entry.id().to_string(),
                entry.timestamp().format("%Y-%m-%d").to_string(),
                entry.mode().to_string(),
                format_currency(results.gross, currency),
                format_currency(results.total_deductions, currency),
                format_currency(results.net, currency),
            )?;
        }
        Ok(())
    }
}
