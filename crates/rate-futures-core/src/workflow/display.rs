use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::instruments::{DepositType, Future, Underlying};
use crate::types::{Money, Rate};

/// Flat listing view of a future and the underlying it points to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FutureDisplay {
    pub id: Option<u64>,
    pub symbol: Option<String>,
    pub description: Option<String>,
    pub isin: Option<String>,
    pub parent_ticker: Option<String>,
    pub first_trading_date: Option<NaiveDate>,
    pub last_trading_date: Option<NaiveDate>,
    pub maturity_date: Option<NaiveDate>,
    pub tick_size: Option<Decimal>,
    pub tick_value: Option<Decimal>,
    pub trading_currency: Option<String>,
    pub lot_size: Option<i64>,
    pub contract_multiplier: Option<i64>,
    pub percentage_margin: Option<Rate>,
    pub theoretical_price: Option<Money>,
    pub contract_value: Option<Money>,
    pub initial_margin_amount: Option<Money>,
    pub instrument_status: Option<bool>,
    pub deposit_type: Option<DepositType>,
    pub underlying_id: Option<u64>,
    pub underlying_identifier: Option<String>,
    pub underlying_type: Option<String>,
    /// Rate type label of a bond underlying.
    pub underlying_rate_type: Option<String>,
}

impl FutureDisplay {
    pub fn new(future: &Future, underlying: Option<&Underlying>) -> Self {
        FutureDisplay {
            id: future.asset.id,
            symbol: future.asset.symbol.clone(),
            description: future.asset.description.clone(),
            isin: future.asset.isin.clone(),
            parent_ticker: future.parent_ticker.clone(),
            first_trading_date: future.first_trading_date,
            last_trading_date: future.last_trading_date,
            maturity_date: future.maturity_date,
            tick_size: future.tick_size,
            tick_value: future.tick_value,
            trading_currency: future.trading_currency.clone(),
            lot_size: future.lot_size,
            contract_multiplier: future.contract_multiplier,
            percentage_margin: future.percentage_margin,
            theoretical_price: future.theoretical_price,
            contract_value: future.contract_value,
            initial_margin_amount: future.initial_margin_amount,
            instrument_status: future.instrument_status,
            deposit_type: future.deposit_type,
            underlying_id: underlying.map(|u| u.id).or(future.underlying_id),
            underlying_identifier: underlying.and_then(|u| u.identifier.clone()),
            underlying_type: underlying.and_then(|u| u.type_name()),
            underlying_rate_type: underlying
                .and_then(|u| u.bond())
                .and_then(|b| b.rate_type)
                .map(|rt| rt.label().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::{AssetInfo, Bond, RateType, UnderlyingAsset, UnderlyingType};
    use rust_decimal_macros::dec;

    #[test]
    fn test_display_carries_underlying_fields() {
        let mut future = Future::new(AssetInfo::with_symbol("FGBL-H26"));
        future.theoretical_price = Some(dec!(131.42));
        let underlying = Underlying {
            id: 3,
            identifier: Some("Bund 2.6% 2035".into()),
            underlying_type: Some(UnderlyingType::Bonds),
            asset: None,
        };
        let view = FutureDisplay::new(&future, Some(&underlying));
        assert_eq!(view.symbol.as_deref(), Some("FGBL-H26"));
        assert_eq!(view.theoretical_price, Some(dec!(131.42)));
        assert_eq!(view.underlying_id, Some(3));
        assert_eq!(view.underlying_type.as_deref(), Some("BONDS"));
        assert_eq!(view.underlying_rate_type, None);
    }

    #[test]
    fn test_display_labels_bond_rate_type() {
        let mut bond = Bond::new(AssetInfo::with_symbol("OAT-2030"));
        bond.rate_type = Some(RateType::FixedRate);
        let underlying = Underlying {
            id: 4,
            identifier: Some("OAT 2.5% 2030".into()),
            underlying_type: Some(UnderlyingType::Bonds),
            asset: Some(UnderlyingAsset::Bond(bond)),
        };
        let view = FutureDisplay::new(&Future::default(), Some(&underlying));
        assert_eq!(view.underlying_rate_type.as_deref(), Some("Taux fixe"));
    }

    #[test]
    fn test_display_without_underlying_falls_back_to_reference() {
        let mut future = Future::default();
        future.underlying_id = Some(12);
        let view = FutureDisplay::new(&future, None);
        assert_eq!(view.underlying_id, Some(12));
        assert_eq!(view.underlying_identifier, None);
    }
}
