//! Interest-rate future contract.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::asset::AssetInfo;
use super::enums::{CollateralMethod, DepositType, SettlementMethod};
use crate::types::{Money, Rate};

/// A listed future on an interest-rate underlying.
///
/// `theoretical_price`, `contract_value` and `initial_margin_amount` belong
/// to the pricing engine: they start out absent and are overwritten on each
/// pricing pass. Everything else is set when the contract is created.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Future {
    #[serde(flatten)]
    pub asset: AssetInfo,
    pub expiration_code: Option<String>,
    pub parent_ticker: Option<String>,
    pub full_name: Option<String>,
    pub segment: Option<String>,

    pub first_trading_date: Option<NaiveDate>,
    pub last_trading_date: Option<NaiveDate>,
    /// Pricing horizon.
    pub maturity_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,

    pub tick_size: Option<Decimal>,
    pub tick_value: Option<Decimal>,
    pub trading_currency: Option<String>,
    pub lot_size: Option<i64>,
    pub contract_multiplier: Option<i64>,

    /// Id of the underlying this contract references.
    pub underlying_id: Option<u64>,

    pub settlement_method: Option<SettlementMethod>,
    pub collateral_method: Option<CollateralMethod>,
    pub deposit_type: Option<DepositType>,

    /// Initial margin as a whole percentage of contract value (5 = 5%).
    pub percentage_margin: Option<Rate>,
    pub theoretical_price: Option<Money>,
    pub contract_value: Option<Money>,
    pub initial_margin_amount: Option<Money>,

    pub instrument_status: Option<bool>,
    pub flag_for_delete: Option<bool>,
}

impl Future {
    pub fn new(asset: AssetInfo) -> Self {
        Future {
            asset,
            ..Future::default()
        }
    }

    pub fn with_maturity(mut self, maturity: NaiveDate) -> Self {
        self.maturity_date = Some(maturity);
        self
    }

    pub fn with_contract_multiplier(mut self, multiplier: i64) -> Self {
        self.contract_multiplier = Some(multiplier);
        self
    }

    pub fn with_percentage_margin(mut self, pct: Rate) -> Self {
        self.percentage_margin = Some(pct);
        self
    }

    /// Drop every engine-owned value.
    pub fn clear_computed(&mut self) {
        self.theoretical_price = None;
        self.contract_value = None;
        self.initial_margin_amount = None;
    }

    pub fn has_computed_fields(&self) -> bool {
        self.theoretical_price.is_some()
            || self.contract_value.is_some()
            || self.initial_margin_amount.is_some()
    }
}

/// Value of one tick: `tick_size × contract_multiplier`. Zero unless both
/// inputs are positive and the product fits.
pub fn tick_value_from_multiplier(tick_size: Decimal, contract_multiplier: Decimal) -> Decimal {
    if tick_size <= Decimal::ZERO || contract_multiplier <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    tick_size
        .checked_mul(contract_multiplier)
        .unwrap_or(Decimal::ZERO)
}

/// Multiplier implied by a tick value: `tick_value / tick_size`. Zero when
/// the tick size is not positive or the quotient overflows.
pub fn contract_multiplier_from_tick_value(tick_size: Decimal, tick_value: Decimal) -> Decimal {
    if tick_size <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    tick_value.checked_div(tick_size).unwrap_or(Decimal::ZERO)
}
