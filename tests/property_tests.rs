use approx::assert_abs_diff_eq;
use payout_calc::domain::inputs::{CalculatorInputs, Mode};
use payout_calc::domain::payout::{calculate, compute_forward, compute_inverse, net_share};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;

/// A non-negative amount with two decimals, up to `max_cents / 100`.
fn arb_money(max_cents: i64) -> impl Strategy<Value = Decimal> {
    (0..=max_cents).prop_map(|cents| Decimal::new(cents, 2))
}

/// Any amount, including negatives the input boundary might let through.
fn arb_signed(max_cents: i64) -> impl Strategy<Value = Decimal> {
    (-max_cents..=max_cents).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_inputs() -> impl Strategy<Value = CalculatorInputs> {
    (
        arb_money(50_000),
        arb_money(30_000),
        arb_money(15_000),
        arb_money(5_000),
        arb_money(10_000),
        (1i64..=1_000_000).prop_map(|v| Decimal::new(v, 4)),
        proptest::option::of(arb_money(10_000_000)),
        0u32..=7,
    )
        .prop_map(
            |(rate, hours, fee, vat, withdrawal, exchange, target, days)| CalculatorInputs {
                hourly_rate: rate,
                hours_worked: hours,
                service_fee_rate: fee,
                vat_rate: vat,
                withdrawal_fee: withdrawal,
                exchange_rate: exchange,
                target_net: target,
                working_days_per_week: days,
                ..CalculatorInputs::default()
            },
        )
}

/// Any value `Decimal` can hold, with its extremes drawn more often.
fn arb_full_range() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        1 => Just(Decimal::MAX),
        1 => Just(Decimal::MIN),
        1 => Just(Decimal::ZERO),
        7 => (any::<u32>(), any::<u32>(), any::<u32>(), any::<bool>(), 0u32..=28)
            .prop_map(|(lo, mid, hi, negative, scale)| {
                Decimal::from_parts(lo, mid, hi, negative, scale)
            }),
    ]
}

fn arb_extreme_inputs() -> impl Strategy<Value = CalculatorInputs> {
    (
        arb_full_range(),
        arb_full_range(),
        arb_full_range(),
        arb_full_range(),
        arb_full_range(),
        arb_full_range(),
        proptest::option::of(arb_full_range()),
        any::<u32>(),
    )
        .prop_map(
            |(rate, hours, fee, vat, withdrawal, exchange, target, days)| CalculatorInputs {
                hourly_rate: rate,
                hours_worked: hours,
                service_fee_rate: fee,
                vat_rate: vat,
                withdrawal_fee: withdrawal,
                exchange_rate: exchange,
                target_net: target,
                working_days_per_week: days,
                ..CalculatorInputs::default()
            },
        )
}

proptest! {
    // Gross is exactly rate times hours.
    #[test]
    fn gross_is_rate_times_hours(inputs in arb_inputs()) {
        let results = compute_forward(&inputs);
        prop_assert_eq!(results.gross, inputs.hourly_rate * inputs.hours_worked);
    }

    // Net never goes below zero, whatever the inputs.
    #[test]
    fn net_is_never_negative(
        inputs in arb_inputs(),
        rate in arb_signed(50_000),
        withdrawal in arb_signed(100_000),
    ) {
        let inputs = CalculatorInputs { hourly_rate: rate, withdrawal_fee: withdrawal, ..inputs };
        prop_assert!(compute_forward(&inputs).net >= Decimal::ZERO);
        prop_assert!(compute_inverse(&inputs).net >= Decimal::ZERO);
    }

    // Deductions are the nominal sum, even when the net floor kicks in.
    #[test]
    fn deductions_are_nominal(inputs in arb_inputs()) {
        let r = compute_forward(&inputs);
        prop_assert_eq!(
            r.total_deductions,
            r.service_fee_amount + r.vat_amount + inputs.withdrawal_fee
        );
        prop_assert_eq!(r.subtotal, r.gross - r.service_fee_amount - r.vat_amount);
        prop_assert_eq!(r.withdrawal_fee, inputs.withdrawal_fee);
    }

    // Inverse then forward gets back to the target net.
    #[test]
    fn inverse_round_trips_to_target(inputs in arb_inputs()) {
        prop_assume!(net_share(&inputs) > Decimal::ZERO);
        prop_assume!(inputs.hourly_rate > Decimal::ZERO);

        let inverse = compute_inverse(&inputs);
        let hours = inverse.hours_required.unwrap();
        let forward = compute_forward(&inputs.with_hours(hours));
        let target = inputs.target_net.unwrap_or(Decimal::ZERO);

        prop_assert!(
            (forward.net - target).abs() <= dec!(0.000000001),
            "net {} should match target {}",
            forward.net,
            target
        );
        prop_assert_eq!(forward.net, inverse.net);
    }

    // No divisor left means no solution, reported as all zeros.
    #[test]
    fn unreachable_target_is_all_zero(inputs in arb_inputs()) {
        prop_assume!(net_share(&inputs) <= Decimal::ZERO || inputs.hourly_rate.is_zero());

        let r = compute_inverse(&inputs);
        prop_assert!(r.is_unreachable());
        prop_assert_eq!(r.gross, Decimal::ZERO);
        prop_assert_eq!(r.net, Decimal::ZERO);
        prop_assert_eq!(r.net_in_local_currency, Decimal::ZERO);
        prop_assert_eq!(r.hours_per_day, Some(Decimal::ZERO));
        prop_assert_eq!(r.withdrawal_fee, inputs.withdrawal_fee);
    }

    // Every representable input yields a result, never a panic.
    #[test]
    fn engine_is_total_over_decimal_range(inputs in arb_extreme_inputs()) {
        let forward = compute_forward(&inputs);
        prop_assert!(forward.net >= Decimal::ZERO);
        prop_assert_eq!(forward.gross, inputs.hourly_rate.saturating_mul(inputs.hours_worked));

        let inverse = compute_inverse(&inputs);
        prop_assert!(inverse.net >= Decimal::ZERO);
        prop_assert!(inverse.hours_required.is_some());
    }

    // Same inputs, same outputs.
    #[test]
    fn calculation_is_idempotent(inputs in arb_inputs()) {
        prop_assert_eq!(calculate(Mode::Payout, &inputs), calculate(Mode::Payout, &inputs));
        prop_assert_eq!(calculate(Mode::Target, &inputs), calculate(Mode::Target, &inputs));
    }

    // Hours per day splits the total evenly over the working days.
    #[test]
    fn hours_per_day_splits_total(inputs in arb_inputs()) {
        prop_assume!(net_share(&inputs) > Decimal::ZERO);
        prop_assume!(inputs.hourly_rate > Decimal::ZERO);
        prop_assume!(inputs.working_days_per_week > 0);

        let r = compute_inverse(&inputs);
        let total = r.hours_required.unwrap().to_f64().unwrap();
        let per_day = r.hours_per_day.unwrap().to_f64().unwrap();
        let days = f64::from(inputs.working_days_per_week);
        prop_assert!((per_day * days - total).abs() <= 1e-6 * total.max(1.0));
    }
}

#[test]
fn inverse_scenario_in_floating_point() {
    let inputs = CalculatorInputs {
        target_net: Some(dec!(1000)),
        ..CalculatorInputs::default()
    };
    let r = compute_inverse(&inputs);

    assert_abs_diff_eq!(r.gross.to_f64().unwrap(), 1030.0 / 0.88, epsilon = 1e-9);
    assert_abs_diff_eq!(
        r.hours_required.unwrap().to_f64().unwrap(),
        1030.0 / 0.88 / 50.0,
        epsilon = 1e-9
    );
    assert_abs_diff_eq!(
        r.hours_per_day.unwrap().to_f64().unwrap(),
        1030.0 / 0.88 / 250.0,
        epsilon = 1e-9
    );
    assert_abs_diff_eq!(r.net.to_f64().unwrap(), 1000.0, epsilon = 1e-9);
}

#[test]
fn withdrawal_fee_above_subtotal_floors_net() {
    let inputs = CalculatorInputs {
        hours_worked: dec!(1),
        withdrawal_fee: dec!(500),
        ..CalculatorInputs::default()
    };
    let r = compute_forward(&inputs);
    assert_eq!(r.subtotal, dec!(44));
    assert_eq!(r.net, Decimal::ZERO);
    assert_eq!(r.total_deductions, dec!(506));
}
