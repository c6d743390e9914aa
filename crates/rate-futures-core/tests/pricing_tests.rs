use chrono::{Duration, NaiveDate};
use pretty_assertions::assert_eq;
use rate_futures_core::instruments::bond::prorate_coupon;
use rate_futures_core::instruments::{AssetInfo, Bond, CashFlow, Future};
use rate_futures_core::pricing::report::{price_future, FuturePricingInput};
use rate_futures_core::time_value::round_half_up;
use rate_futures_core::{FixedClock, PricingConfig, PricingEngine, RateFuturesError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 20).unwrap()
}

fn engine() -> PricingEngine<FixedClock> {
    PricingEngine::with_clock(PricingConfig::default(), FixedClock(today()))
}

fn days(n: i64) -> NaiveDate {
    today() + Duration::days(n)
}

fn sample_future() -> Future {
    Future::new(AssetInfo::with_symbol("FOAT-Z25"))
        .with_maturity(today())
        .with_contract_multiplier(1000)
        .with_percentage_margin(dec!(5))
}

// ===========================================================================
// Bond helpers
// ===========================================================================

#[test]
fn test_empty_schedule_yields_zero_pv_and_accrual() {
    let bond = Bond::new(AssetInfo::with_symbol("EMPTY")).with_coupon_amount(dec!(3));
    for rate in [dec!(0), dec!(0.03), dec!(0.25)] {
        assert_eq!(bond.present_value_of_coupons(rate, today(), 10).unwrap(), Decimal::ZERO);
    }
    for offset in [-400, 0, 400] {
        assert_eq!(bond.accrued_interest(days(offset)).unwrap(), Decimal::ZERO);
    }
}

#[test]
fn test_single_coupon_discounted_one_year() {
    let bond = Bond::new(AssetInfo::default()).with_coupons(vec![CashFlow::new(days(365), dec!(100))]);
    let pv = bond.present_value_of_coupons(dec!(0.03), today(), 10).unwrap();
    assert_eq!(round_half_up(pv, 4), dec!(97.0874));
}

#[test]
fn test_accrual_midpoint() {
    let bond = Bond::new(AssetInfo::default())
        .with_coupon_amount(dec!(100))
        .with_coupons(vec![
            CashFlow::new(days(-50), dec!(100)),
            CashFlow::new(days(40), dec!(100)),
        ]);
    assert_eq!(round_half_up(bond.accrued_interest(today()).unwrap(), 4), dec!(55.5556));
}

#[test]
fn test_zero_interval_guard() {
    let err = prorate_coupon(dec!(100), days(-5), days(-5), today()).unwrap_err();
    assert!(matches!(err, RateFuturesError::InvalidSchedule { .. }));
    assert!(err.to_string().contains("zero-day"));
}

// ===========================================================================
// Pricing engine
// ===========================================================================

#[test]
fn test_zero_horizon_price() {
    let bond = Bond::new(AssetInfo::default()).with_clean_price(dec!(100));
    let mut future = sample_future();
    engine().compute_theoretical_price(&mut future, Some(&bond)).unwrap();
    assert_eq!(future.theoretical_price, Some(dec!(100.0000)));
}

#[test]
fn test_full_pipeline() {
    let mut future = sample_future();
    future.theoretical_price = Some(dec!(100));
    let e = engine();
    e.compute_contract_value(&mut future).unwrap();
    e.compute_initial_margin(&mut future).unwrap();
    assert_eq!(future.contract_value, Some(dec!(100000.0000)));
    assert_eq!(future.initial_margin_amount, Some(dec!(5000.0000)));
}

#[test]
fn test_outputs_carry_four_decimal_places() {
    let bond = Bond::new(AssetInfo::default()).with_clean_price(dec!(100));
    let mut future = sample_future().with_maturity(days(91));
    engine().compute_all(&mut future, Some(&bond)).unwrap();
    for value in [
        future.theoretical_price,
        future.contract_value,
        future.initial_margin_amount,
    ] {
        assert!(value.unwrap().scale() <= 4, "{value:?} has more than 4 dp");
    }
}

#[test]
fn test_missing_multiplier_propagates() {
    let mut future = sample_future();
    future.contract_multiplier = None;
    let bond = Bond::new(AssetInfo::default()).with_clean_price(dec!(100));
    engine().compute_all(&mut future, Some(&bond)).unwrap();
    assert_eq!(future.theoretical_price, Some(dec!(100)));
    assert_eq!(future.contract_value, None);
    assert_eq!(future.initial_margin_amount, None);
}

#[test]
fn test_missing_margin_percentage_leaves_margin_absent() {
    let mut future = sample_future();
    future.percentage_margin = None;
    let bond = Bond::new(AssetInfo::default()).with_clean_price(dec!(100));
    engine().compute_all(&mut future, Some(&bond)).unwrap();
    assert_eq!(future.contract_value, Some(dec!(100000)));
    assert_eq!(future.initial_margin_amount, None);
}

#[test]
fn test_compute_all_idempotent() {
    let bond = Bond::new(AssetInfo::default())
        .with_clean_price(dec!(97.35))
        .with_coupon_amount(dec!(1.5))
        .with_coupons(vec![
            CashFlow::new(days(-91), dec!(1.5)),
            CashFlow::new(days(91), dec!(1.5)),
            CashFlow::new(days(273), dec!(1.5)),
        ]);
    let e = engine();
    let mut future = sample_future().with_maturity(days(150));
    e.compute_all(&mut future, Some(&bond)).unwrap();
    let first = future.clone();
    e.compute_all(&mut future, Some(&bond)).unwrap();
    assert_eq!(future, first);
}

#[test]
fn test_higher_rate_raises_carry_for_couponless_bond() {
    let bond = Bond::new(AssetInfo::default()).with_clean_price(dec!(100));
    let low = PricingEngine::with_clock(
        PricingConfig::default().with_risk_free_rate(dec!(0.01)),
        FixedClock(today()),
    );
    let high = PricingEngine::with_clock(
        PricingConfig::default().with_risk_free_rate(dec!(0.05)),
        FixedClock(today()),
    );
    let mut f_low = sample_future().with_maturity(days(180));
    let mut f_high = f_low.clone();
    low.compute_theoretical_price(&mut f_low, Some(&bond)).unwrap();
    high.compute_theoretical_price(&mut f_high, Some(&bond)).unwrap();
    assert!(f_high.theoretical_price > f_low.theoretical_price);
}

// ===========================================================================
// JSON entry point
// ===========================================================================

#[test]
fn test_price_future_from_json() {
    let json = r#"{
        "valuation_date": "2025-10-20",
        "future": {
            "symbol": "FOAT-Z25",
            "maturity_date": "2025-10-20",
            "contract_multiplier": 1000,
            "percentage_margin": "5"
        },
        "bond": { "symbol": "OAT", "underlying_price": "100" }
    }"#;
    let input: FuturePricingInput = serde_json::from_str(json).unwrap();
    let out = price_future(&input, &PricingConfig::default()).unwrap();
    assert_eq!(out.result.theoretical_price, Some(dec!(100)));
    assert_eq!(out.result.contract_value, Some(dec!(100000)));
    assert_eq!(out.result.initial_margin_amount, Some(dec!(5000)));

    let value = serde_json::to_value(&out).unwrap();
    assert!(value["result"]["contract_value"].is_string());
    assert_eq!(value["metadata"]["precision"], "rust_decimal_128bit_half_up");
}
