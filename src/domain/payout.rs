//! The payout formula and its inverse.
//!
//! Both directions are pure functions over [`CalculatorInputs`]. The inverse
//! only solves for the hours; the breakdown always comes from
//! [`compute_forward`], so the two directions cannot disagree.

use super::inputs::{CalculatorInputs, Mode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Breakdown of a single payout.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResults {
    pub gross: Decimal,
    pub service_fee_amount: Decimal,
    pub vat_amount: Decimal,
    /// Gross minus service fee and VAT, before the withdrawal fee.
    pub subtotal: Decimal,
    pub withdrawal_fee: Decimal,
    /// Nominal sum of fee, VAT and withdrawal fee. Not reconciled with the
    /// zero floor on `net`.
    pub total_deductions: Decimal,
    pub net: Decimal,
    pub net_in_local_currency: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours_required: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours_per_day: Option<Decimal>,
}

impl CalculationResults {
    /// The "no solution" answer of [`compute_inverse`].
    fn unreachable(withdrawal_fee: Decimal) -> Self {
        Self {
            withdrawal_fee,
            hours_required: Some(Decimal::ZERO),
            hours_per_day: Some(Decimal::ZERO),
            ..Self::default()
        }
    }

    /// True when this is the inverse-mode sentinel: the target cannot be
    /// reached with the current rate and fees.
    pub fn is_unreachable(&self) -> bool {
        self.hours_required == Some(Decimal::ZERO) && self.gross.is_zero() && self.net.is_zero()
    }

    /// Only results with some gross income are worth keeping in history.
    pub fn can_save(&self) -> bool {
        self.gross > Decimal::ZERO
    }
}

/// Share of gross left after the service fee and the VAT on it.
pub fn net_share(inputs: &CalculatorInputs) -> Decimal {
    let s = inputs.service_fee_rate / HUNDRED;
    let v = inputs.vat_rate / HUNDRED;
    Decimal::ONE.saturating_sub(s.saturating_mul(Decimal::ONE.saturating_add(v)))
}

/// Computes the net payout for `inputs.hours_worked` hours.
///
/// Amounts beyond the range of [`Decimal`] saturate at its bounds.
pub fn compute_forward(inputs: &CalculatorInputs) -> CalculationResults {
    let gross = inputs.hourly_rate.saturating_mul(inputs.hours_worked);
    let service_fee_amount = gross.saturating_mul(inputs.service_fee_rate / HUNDRED);
    // VAT is charged on the platform fee, not on gross
    let vat_amount = service_fee_amount.saturating_mul(inputs.vat_rate / HUNDRED);
    let subtotal = gross
        .saturating_sub(service_fee_amount)
        .saturating_sub(vat_amount);

    let net = subtotal
        .saturating_sub(inputs.withdrawal_fee)
        .max(Decimal::ZERO);
    let total_deductions = service_fee_amount
        .saturating_add(vat_amount)
        .saturating_add(inputs.withdrawal_fee);

    let exchange_rate = if inputs.exchange_rate.is_zero() {
        Decimal::ONE
    } else {
        inputs.exchange_rate
    };

    CalculationResults {
        gross,
        service_fee_amount,
        vat_amount,
        subtotal,
        withdrawal_fee: inputs.withdrawal_fee,
        total_deductions,
        net,
        net_in_local_currency: net.saturating_mul(exchange_rate),
        hours_required: None,
        hours_per_day: None,
    }
}

/// Solves for the hours needed to net `inputs.target_net`, then runs the
/// forward formula with those hours.
///
/// Returns an all-zero result (see [`CalculationResults::is_unreachable`])
/// when fees eat the whole gross, the hourly rate is not positive, or the
/// required hours fall outside the range of [`Decimal`].
pub fn compute_inverse(inputs: &CalculatorInputs) -> CalculationResults {
    let target_net = inputs.target_net.unwrap_or(Decimal::ZERO);
    let divisor = net_share(inputs);

    if divisor <= Decimal::ZERO || inputs.hourly_rate <= Decimal::ZERO {
        return CalculationResults::unreachable(inputs.withdrawal_fee);
    }

    let hours_required = match target_net
        .checked_add(inputs.withdrawal_fee)
        .and_then(|needed| needed.checked_div(divisor))
        .and_then(|gross_required| gross_required.checked_div(inputs.hourly_rate))
    {
        Some(hours) => hours,
        None => return CalculationResults::unreachable(inputs.withdrawal_fee),
    };

    let hours_per_day = if inputs.working_days_per_week > 0 {
        hours_required / Decimal::from(inputs.working_days_per_week)
    } else {
        Decimal::ZERO
    };

    CalculationResults {
        hours_required: Some(hours_required),
        hours_per_day: Some(hours_per_day),
        ..compute_forward(&inputs.with_hours(hours_required))
    }
}

/// Runs the formula in the direction selected by `mode`.
pub fn calculate(mode: Mode, inputs: &CalculatorInputs) -> CalculationResults {
    match mode {
        Mode::Payout => compute_forward(inputs),
        Mode::Target => compute_inverse(inputs),
    }
}
