use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque currency code such as `USD` or `TRY`.
///
/// Only used for display and export; the engine never looks at it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns this code, or `fallback` when the code is blank.
    pub fn or<'a>(&'a self, fallback: &'a str) -> &'a str {
        if self.is_empty() { fallback } else { &self.0 }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Which way the payout formula is evaluated.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Hours worked in, net payout out.
    #[default]
    Payout,
    /// Target net in, required hours out.
    Target,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Payout => f.write_str("payout"),
            Mode::Target => f.write_str("target"),
        }
    }
}

/// Everything a single calculation needs.
///
/// Rates are whole-number percentages (`10` means 10%). Fields are expected
/// to be sanitised by whoever builds the record: the engine does not
/// validate ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorInputs {
    pub hourly_rate: Decimal,
    pub hours_worked: Decimal,
    pub service_fee_rate: Decimal,
    pub vat_rate: Decimal,
    /// Fixed amount in the base currency, charged once per payout.
    pub withdrawal_fee: Decimal,
    /// 1 unit of `currency` = `exchange_rate` units of `local_currency`.
    pub exchange_rate: Decimal,
    pub currency: CurrencyCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_net: Option<Decimal>,
    pub working_days_per_week: u32,
    pub local_currency: CurrencyCode,
}

impl Default for CalculatorInputs {
    fn default() -> Self {
        Self {
            hourly_rate: dec!(50),
            hours_worked: dec!(40),
            service_fee_rate: dec!(10),
            vat_rate: dec!(20),
            withdrawal_fee: dec!(30),
            exchange_rate: Decimal::ONE,
            currency: CurrencyCode::new("USD"),
            target_net: Some(dec!(1000)),
            working_days_per_week: 5,
            local_currency: CurrencyCode::new("TRY"),
        }
    }
}

impl CalculatorInputs {
    /// Copy of these inputs with a different number of hours.
    pub fn with_hours(&self, hours_worked: Decimal) -> Self {
        Self {
            hours_worked,
            ..self.clone()
        }
    }
}
