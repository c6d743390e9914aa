//! Creating a future from a request and pricing it against its underlying.
//!
//! Pricing is best effort: a future whose calculation fails is still
//! returned, with every computed field cleared, so the caller can store the
//! contract itself. Only an unknown underlying stops creation.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::catalog::UnderlyingSource;
use crate::clock::Clock;
use crate::error::RateFuturesError;
use crate::instruments::future::{contract_multiplier_from_tick_value, tick_value_from_multiplier};
use crate::instruments::{
    AssetInfo, CollateralMethod, DepositType, Future, SettlementMethod, Underlying, UnderlyingAsset,
};
use crate::pricing::PricingEngine;
use crate::types::Rate;
use crate::RateFuturesResult;

/// Fields a user supplies to list a new future.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FutureCreationRequest {
    pub symbol: Option<String>,
    pub description: Option<String>,
    pub isin: Option<String>,
    pub expiration_code: Option<String>,
    pub parent_ticker: Option<String>,
    pub full_name: Option<String>,
    pub segment: Option<String>,

    pub maturity_date: Option<NaiveDate>,
    pub first_trading_date: Option<NaiveDate>,
    pub last_trading_date: Option<NaiveDate>,

    pub percentage_margin: Option<Rate>,
    pub lot_size: Option<i64>,
    pub contract_multiplier: Option<i64>,
    pub trading_currency: Option<String>,
    pub tick_size: Option<Decimal>,
    pub tick_value: Option<Decimal>,

    pub underlying_id: u64,

    pub settlement_method: Option<SettlementMethod>,
    pub deposit_type: Option<DepositType>,
    pub instrument_status: Option<bool>,
}

/// What happened to the pricing pass during creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PricingOutcome {
    Priced,
    Skipped { reason: String },
    Failed { error: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedFuture {
    pub future: Future,
    pub pricing: PricingOutcome,
}

impl FutureCreationRequest {
    /// Build the contract with creation defaults applied, before pricing.
    pub fn to_future(&self) -> Future {
        let mut future = Future::new(AssetInfo {
            id: None,
            name: self.full_name.clone(),
            symbol: self.symbol.clone(),
            description: self.description.clone(),
            isin: self.isin.clone(),
        });
        future.expiration_code = self.expiration_code.clone();
        future.parent_ticker = self.parent_ticker.clone();
        future.full_name = self.full_name.clone();
        future.segment = self.segment.clone();
        future.maturity_date = self.maturity_date;
        future.first_trading_date = self.first_trading_date;
        future.last_trading_date = self.last_trading_date;
        future.lot_size = self.lot_size;
        future.contract_multiplier = self.contract_multiplier;
        future.trading_currency = self.trading_currency.clone();
        future.tick_size = self.tick_size;
        future.tick_value = self.tick_value;
        future.percentage_margin = self.percentage_margin;
        future.settlement_method = self.settlement_method;
        future.underlying_id = Some(self.underlying_id);

        future.deposit_type = Some(self.deposit_type.unwrap_or_default());
        future.collateral_method = Some(CollateralMethod::default());
        future.instrument_status = Some(self.instrument_status.unwrap_or(false));
        future.flag_for_delete = Some(false);

        fill_tick_economics(&mut future);
        future
    }
}

/// Derive whichever of tick value / contract multiplier is missing from the
/// other two. A multiplier is only filled in when the ratio is a whole number.
fn fill_tick_economics(future: &mut Future) {
    match (future.tick_size, future.tick_value, future.contract_multiplier) {
        (Some(size), None, Some(multiplier)) => {
            let value = tick_value_from_multiplier(size, Decimal::from(multiplier));
            if !value.is_zero() {
                future.tick_value = Some(value);
            }
        }
        (Some(size), Some(value), None) => {
            let implied = contract_multiplier_from_tick_value(size, value);
            if !implied.is_zero() && implied.fract().is_zero() {
                future.contract_multiplier = implied.to_i64();
            }
        }
        _ => {}
    }
}

fn skip_reason(underlying: &Underlying) -> String {
    match &underlying.asset {
        None => format!("Underlying {} is not backed by an asset", underlying.id),
        Some(UnderlyingAsset::Other(_)) => {
            format!("Underlying {} is not a bond; calculations skipped", underlying.id)
        }
        Some(UnderlyingAsset::Bond(_)) => String::new(),
    }
}

/// Build, link and price a new future.
pub fn create_future<S, C>(
    request: &FutureCreationRequest,
    underlyings: &S,
    engine: &PricingEngine<C>,
) -> RateFuturesResult<CreatedFuture>
where
    S: UnderlyingSource + ?Sized,
    C: Clock,
{
    let underlying = underlyings
        .find_underlying(request.underlying_id)
        .ok_or(RateFuturesError::UnderlyingNotFound(request.underlying_id))?;

    let mut future = request.to_future();
    debug!(symbol = ?future.asset.symbol, underlying = underlying.id, "creating future");

    let pricing = match underlying.bond() {
        Some(bond) => match engine.compute_all(&mut future, Some(bond)) {
            Ok(()) => PricingOutcome::Priced,
            Err(e) => {
                warn!(
                    symbol = ?future.asset.symbol,
                    underlying = underlying.id,
                    error = %e,
                    "pricing failed, future kept without computed fields"
                );
                future.clear_computed();
                PricingOutcome::Failed {
                    error: e.to_string(),
                }
            }
        },
        None => {
            let reason = skip_reason(underlying);
            info!(symbol = ?future.asset.symbol, %reason, "pricing skipped");
            PricingOutcome::Skipped { reason }
        }
    };

    Ok(CreatedFuture { future, pricing })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::config::PricingConfig;
    use crate::instruments::{Bond, CashFlow, UnderlyingType};
    use crate::workflow::catalog::UnderlyingCatalog;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 3).unwrap()
    }

    fn engine() -> PricingEngine<FixedClock> {
        PricingEngine::with_clock(PricingConfig::default(), FixedClock(today()))
    }

    fn catalog() -> UnderlyingCatalog {
        let bond = Bond::new(AssetInfo::with_symbol("OAT-2030"))
            .with_clean_price(dec!(100))
            .with_coupon_amount(dec!(2.5))
            .with_coupons(vec![CashFlow::new(today() + Duration::days(200), dec!(2.5))]);
        UnderlyingCatalog::new(vec![
            Underlying {
                id: 1,
                identifier: Some("OAT 2.5% 2030".into()),
                underlying_type: Some(UnderlyingType::Bonds),
                asset: Some(UnderlyingAsset::Bond(bond)),
            },
            Underlying {
                id: 2,
                identifier: Some("EURIBOR3M".into()),
                underlying_type: Some(UnderlyingType::InterestRate),
                asset: None,
            },
        ])
    }

    fn request(underlying_id: u64) -> FutureCreationRequest {
        FutureCreationRequest {
            symbol: Some("FOAT-Z25".into()),
            maturity_date: Some(today()),
            contract_multiplier: Some(1000),
            percentage_margin: Some(dec!(4)),
            underlying_id,
            ..FutureCreationRequest::default()
        }
    }

    #[test]
    fn test_creation_defaults() {
        let future = request(1).to_future();
        assert_eq!(future.deposit_type, Some(DepositType::Rate));
        assert_eq!(future.collateral_method, Some(CollateralMethod::CashCollateral));
        assert_eq!(future.instrument_status, Some(false));
        assert_eq!(future.flag_for_delete, Some(false));
        assert_eq!(future.underlying_id, Some(1));
        assert!(!future.has_computed_fields());
    }

    #[test]
    fn test_tick_value_derived_from_multiplier() {
        let mut req = request(1);
        req.tick_size = Some(dec!(0.01));
        let future = req.to_future();
        assert_eq!(future.tick_value, Some(dec!(10)));
    }

    #[test]
    fn test_multiplier_derived_from_tick_value() {
        let mut req = request(1);
        req.contract_multiplier = None;
        req.tick_size = Some(dec!(0.005));
        req.tick_value = Some(dec!(12.5));
        assert_eq!(req.to_future().contract_multiplier, Some(2500));

        req.tick_value = Some(dec!(12.501));
        assert_eq!(req.to_future().contract_multiplier, None);
    }

    #[test]
    fn test_bond_underlying_is_priced() {
        let created = create_future(&request(1), &catalog(), &engine()).unwrap();
        assert_eq!(created.pricing, PricingOutcome::Priced);
        assert!(created.future.theoretical_price.is_some());
        assert!(created.future.contract_value.is_some());
        assert!(created.future.initial_margin_amount.is_some());
    }

    #[test]
    fn test_non_bond_underlying_is_skipped() {
        let created = create_future(&request(2), &catalog(), &engine()).unwrap();
        assert!(matches!(created.pricing, PricingOutcome::Skipped { .. }));
        assert!(!created.future.has_computed_fields());
    }

    #[test]
    fn test_unknown_underlying_fails() {
        let err = create_future(&request(99), &catalog(), &engine()).unwrap_err();
        assert!(matches!(err, RateFuturesError::UnderlyingNotFound(99)));
    }

    #[test]
    fn test_pricing_failure_keeps_future_without_computed_fields() {
        let broken = Bond::new(AssetInfo::default())
            .with_clean_price(Decimal::MAX)
            .with_coupon_amount(dec!(10))
            .with_coupons(vec![
                CashFlow::new(today() - Duration::days(10), dec!(10)),
                CashFlow::new(today() + Duration::days(10), dec!(10)),
            ]);
        let catalog = UnderlyingCatalog::new(vec![Underlying {
            id: 5,
            identifier: None,
            underlying_type: Some(UnderlyingType::Bonds),
            asset: Some(UnderlyingAsset::Bond(broken)),
        }]);
        let created = create_future(&request(5), &catalog, &engine()).unwrap();
        assert!(matches!(created.pricing, PricingOutcome::Failed { .. }));
        assert!(!created.future.has_computed_fields());
        assert_eq!(created.future.asset.symbol.as_deref(), Some("FOAT-Z25"));
    }
}
