//! Bond-future theoretical pricing.
//!
//! ```text
//! F = (clean + accrued − PV(coupons @ r)) × e^(r·t)
//! contract value = F × multiplier
//! initial margin = contract value × margin% / 100
//! ```
//!
//! `r` is the configured risk-free rate and `t = days to maturity / 365`.
//! Every monetary output is rounded half-up to the configured scale.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::PricingConfig;
use crate::error::RateFuturesError;
use crate::instruments::{Bond, Future};
use crate::time_value::{continuous_growth_factor, round_half_up, year_fraction_at_scale};
use crate::types::{Money, Years};
use crate::RateFuturesResult;

/// Intermediate terms of one theoretical-price evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceComponents {
    pub valuation_date: NaiveDate,
    pub clean_price: Money,
    pub accrued_interest: Money,
    pub coupon_present_value: Money,
    pub years_to_maturity: Years,
    pub growth_factor: Decimal,
    pub theoretical_price: Money,
}

/// Stateless pricer. Holds only its configuration and a date source, so one
/// engine can price any number of futures, from any number of threads when
/// the clock allows it.
#[derive(Debug, Clone)]
pub struct PricingEngine<C: Clock = SystemClock> {
    config: PricingConfig,
    clock: C,
}

impl PricingEngine<SystemClock> {
    pub fn new(config: PricingConfig) -> Self {
        PricingEngine {
            config,
            clock: SystemClock,
        }
    }
}

impl Default for PricingEngine<SystemClock> {
    fn default() -> Self {
        PricingEngine::new(PricingConfig::default())
    }
}

impl<C: Clock> PricingEngine<C> {
    pub fn with_clock(config: PricingConfig, clock: C) -> Self {
        PricingEngine { config, clock }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Evaluate the price formula without touching the future.
    pub fn price_components(&self, future: &Future, bond: &Bond) -> RateFuturesResult<PriceComponents> {
        self.price_components_at(future, bond, self.clock.today())
    }

    fn price_components_at(
        &self,
        future: &Future,
        bond: &Bond,
        today: NaiveDate,
    ) -> RateFuturesResult<PriceComponents> {
        let rate = self.config.risk_free_rate;
        let clean_price = bond.underlying_price.unwrap_or(Decimal::ZERO);
        let accrued_interest = bond.accrued_interest(today)?;
        let coupon_present_value =
            bond.present_value_of_coupons(rate, today, self.config.working_scale)?;

        let maturity = future.maturity_date.unwrap_or(today);
        let years_to_maturity = year_fraction_at_scale(today, maturity, self.config.horizon_scale);
        let growth_factor = continuous_growth_factor(rate, years_to_maturity)?;

        let grown = clean_price
            .checked_add(accrued_interest)
            .and_then(|v| v.checked_sub(coupon_present_value))
            .and_then(|v| v.checked_mul(growth_factor))
            .ok_or_else(|| RateFuturesError::ArithmeticOverflow {
                context: "theoretical price".into(),
            })?;
        let theoretical_price = round_half_up(grown, self.config.monetary_scale);

        Ok(PriceComponents {
            valuation_date: today,
            clean_price,
            accrued_interest,
            coupon_present_value,
            years_to_maturity,
            growth_factor,
            theoretical_price,
        })
    }

    /// Set `future.theoretical_price` from the bond. Does nothing without a bond.
    pub fn compute_theoretical_price(
        &self,
        future: &mut Future,
        bond: Option<&Bond>,
    ) -> RateFuturesResult<()> {
        self.compute_theoretical_price_at(future, bond, self.clock.today())
    }

    fn compute_theoretical_price_at(
        &self,
        future: &mut Future,
        bond: Option<&Bond>,
        today: NaiveDate,
    ) -> RateFuturesResult<()> {
        let Some(bond) = bond else {
            debug!(future = ?future.asset.label(), "no bond supplied, theoretical price left as is");
            return Ok(());
        };
        let components = self.price_components_at(future, bond, today)?;
        debug!(
            future = ?future.asset.label(),
            clean = %components.clean_price,
            accrued = %components.accrued_interest,
            coupon_pv = %components.coupon_present_value,
            years = %components.years_to_maturity,
            price = %components.theoretical_price,
            "theoretical price computed"
        );
        future.theoretical_price = Some(components.theoretical_price);
        Ok(())
    }

    /// Set `future.contract_value = theoretical_price × contract_multiplier`
    /// when both are present.
    pub fn compute_contract_value(&self, future: &mut Future) -> RateFuturesResult<()> {
        let (Some(price), Some(multiplier)) = (future.theoretical_price, future.contract_multiplier)
        else {
            return Ok(());
        };
        let value = price
            .checked_mul(Decimal::from(multiplier))
            .ok_or_else(|| RateFuturesError::ArithmeticOverflow {
                context: "contract value".into(),
            })?;
        future.contract_value = Some(round_half_up(value, self.config.monetary_scale));
        Ok(())
    }

    /// Set `future.initial_margin_amount = contract_value × percentage_margin / 100`
    /// when both are present.
    pub fn compute_initial_margin(&self, future: &mut Future) -> RateFuturesResult<()> {
        let (Some(value), Some(pct)) = (future.contract_value, future.percentage_margin) else {
            return Ok(());
        };
        let margin = value
            .checked_mul(pct)
            .ok_or_else(|| RateFuturesError::ArithmeticOverflow {
                context: "initial margin".into(),
            })?
            / Decimal::ONE_HUNDRED;
        future.initial_margin_amount = Some(round_half_up(margin, self.config.monetary_scale));
        Ok(())
    }

    /// Price, then contract value, then margin.
    ///
    /// A failing step does not stop the later ones, which then work from
    /// whatever values the future already holds. The first error is
    /// returned once all three steps have run.
    pub fn compute_all(&self, future: &mut Future, bond: Option<&Bond>) -> RateFuturesResult<()> {
        let today = self.clock.today();
        let mut first_error = None;

        if let Err(e) = self.compute_theoretical_price_at(future, bond, today) {
            warn!(future = ?future.asset.label(), error = %e, "theoretical price failed");
            first_error.get_or_insert(e);
        }
        if let Err(e) = self.compute_contract_value(future) {
            warn!(future = ?future.asset.label(), error = %e, "contract value failed");
            first_error.get_or_insert(e);
        }
        if let Err(e) = self.compute_initial_margin(future) {
            warn!(future = ?future.asset.label(), error = %e, "initial margin failed");
            first_error.get_or_insert(e);
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
