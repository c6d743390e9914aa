//! JSON-friendly entry points returning the standard output envelope.
//!
//! Each function takes a self-contained input (instrument snapshots plus an
//! optional valuation date) so callers outside Rust never deal with clocks
//! or engine construction. Without a valuation date the system date is used.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::clock::{Clock, FixedClock, SystemClock};
use crate::config::{check_rate, PricingConfig};
use crate::error::RateFuturesError;
use crate::instruments::{Bond, Future};
use crate::pricing::engine::{PriceComponents, PricingEngine};
use crate::time_value::{days_between, round_half_up};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::RateFuturesResult;

fn resolve_date(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| SystemClock.today())
}

fn count_past_coupons(bond: &Bond, today: NaiveDate) -> usize {
    bond.future_coupons()
        .iter()
        .filter(|cf| cf.payment_date < today)
        .count()
}

// ---------------------------------------------------------------------------
// Future pricing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuturePricingInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valuation_date: Option<NaiveDate>,
    pub future: Future,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bond: Option<Bond>,
    /// Overrides the configured risk-free rate for this run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_free_rate: Option<Rate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuturePricingOutput {
    pub theoretical_price: Option<Money>,
    pub contract_value: Option<Money>,
    pub initial_margin_amount: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<PriceComponents>,
    /// The future with its computed fields written.
    pub future: Future,
}

/// Run a full pricing pass on a copy of the input future.
pub fn price_future(
    input: &FuturePricingInput,
    config: &PricingConfig,
) -> RateFuturesResult<ComputationOutput<FuturePricingOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let mut config = config.clone();
    if let Some(rate) = input.risk_free_rate {
        config.risk_free_rate = rate;
    }
    config.validate()?;

    let today = resolve_date(input.valuation_date);
    let engine = PricingEngine::with_clock(config.clone(), FixedClock(today));
    let mut future = input.future.clone();

    let components = match &input.bond {
        Some(bond) => {
            if bond.underlying_price.is_none() {
                warnings.push("Bond has no clean price; zero used".into());
            }
            if bond.future_coupons().is_empty() {
                warnings.push("Bond has no coupon schedule; accrual and coupon PV are zero".into());
            }
            let past = count_past_coupons(bond, today);
            if past > 0 {
                warnings.push(format!(
                    "{past} coupon(s) dated before {today} are included in the coupon present value"
                ));
            }
            Some(engine.price_components(&future, bond)?)
        }
        None => {
            warnings.push("No bond underlying supplied; theoretical price not computed".into());
            None
        }
    };
    if future.maturity_date.is_none() {
        warnings.push("Future has no maturity date; zero horizon used".into());
    }
    if future.contract_multiplier.is_none() {
        warnings.push("Contract multiplier missing; contract value not computed".into());
    }
    if future.percentage_margin.is_none() {
        warnings.push("Margin percentage missing; initial margin not computed".into());
    }

    engine.compute_all(&mut future, input.bond.as_ref())?;

    let output = FuturePricingOutput {
        theoretical_price: future.theoretical_price,
        contract_value: future.contract_value,
        initial_margin_amount: future.initial_margin_amount,
        components,
        future,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Bond future carry model: (clean + accrued − PV coupons) × exp(r·t)",
        &serde_json::json!({
            "valuation_date": today.to_string(),
            "risk_free_rate": config.risk_free_rate.to_string(),
            "year_basis_days": 365,
            "coupon_discounting": "annual compounding, (1 + r)^(days/365)",
            "growth": "continuous compounding",
            "rounding": format!("half-up, {} dp", config.monetary_scale),
        }),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Accrued interest
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccruedInterestInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valuation_date: Option<NaiveDate>,
    pub bond: Bond,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccruedInterestOutput {
    pub last_coupon_date: Option<NaiveDate>,
    pub next_coupon_date: Option<NaiveDate>,
    pub days_elapsed: Option<i64>,
    pub days_in_period: Option<i64>,
    pub accrued_interest: Money,
}

pub fn accrued_interest(
    input: &AccruedInterestInput,
    config: &PricingConfig,
) -> RateFuturesResult<ComputationOutput<AccruedInterestOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();
    let today = resolve_date(input.valuation_date);
    let bond = &input.bond;

    let last = bond.last_coupon_date(today);
    let next = bond.next_coupon_date(today);
    if bond.coupon_amount.is_none() {
        warnings.push("Bond has no coupon amount; accrued interest is zero".into());
    }
    if last.is_none() || next.is_none() {
        warnings.push(format!("No coupon period brackets {today}; accrued interest is zero"));
    }

    let accrued = bond.accrued_interest(today)?;
    let output = AccruedInterestOutput {
        last_coupon_date: last,
        next_coupon_date: next,
        days_elapsed: last.map(|l| days_between(l, today)),
        days_in_period: last.zip(next).map(|(l, n)| days_between(l, n)),
        accrued_interest: round_half_up(accrued, config.monetary_scale),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Linear coupon accrual: coupon × days elapsed / days in period",
        &serde_json::json!({ "valuation_date": today.to_string() }),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Coupon present value
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponPvInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valuation_date: Option<NaiveDate>,
    pub bond: Bond,
    /// Discount rate; the configured risk-free rate when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<Rate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponPvOutput {
    pub present_value: Money,
    pub coupons_counted: usize,
    pub past_dated_coupons: usize,
    pub undiscounted_total: Money,
}

pub fn coupon_present_value(
    input: &CouponPvInput,
    config: &PricingConfig,
) -> RateFuturesResult<ComputationOutput<CouponPvOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();
    let today = resolve_date(input.valuation_date);
    let rate = input.rate.unwrap_or(config.risk_free_rate);
    check_rate("rate", rate)?;

    let bond = &input.bond;
    let past = count_past_coupons(bond, today);
    if past > 0 {
        warnings.push(format!(
            "{past} coupon(s) dated before {today} are compounded forward, not excluded"
        ));
    }

    let pv = bond.present_value_of_coupons(rate, today, config.working_scale)?;
    let undiscounted_total = bond
        .future_coupons()
        .iter()
        .try_fold(Decimal::ZERO, |acc, cf| acc.checked_add(cf.amount))
        .ok_or_else(|| RateFuturesError::ArithmeticOverflow {
            context: "undiscounted coupon total".into(),
        })?;
    let output = CouponPvOutput {
        present_value: round_half_up(pv, config.monetary_scale),
        coupons_counted: bond.future_coupons().len(),
        past_dated_coupons: past,
        undiscounted_total,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Coupon present value: Σ amount / (1 + r)^(days/365)",
        &serde_json::json!({
            "valuation_date": today.to_string(),
            "rate": rate.to_string(),
            "working_scale": config.working_scale,
        }),
        warnings,
        elapsed,
        output,
    ))
}
