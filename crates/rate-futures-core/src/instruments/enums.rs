use serde::{Deserialize, Serialize};

/// Coupon payment frequency of a bond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Periodicity {
    Infinity,
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    SemiAnnual,
    Annual,
}

impl Periodicity {
    pub const ALL: [Periodicity; 7] = [
        Periodicity::Infinity,
        Periodicity::Daily,
        Periodicity::Weekly,
        Periodicity::Monthly,
        Periodicity::Quarterly,
        Periodicity::SemiAnnual,
        Periodicity::Annual,
    ];

    /// Months between two coupons. Zero for frequencies that are not
    /// month-based (perpetual, daily, weekly).
    pub fn months(&self) -> u32 {
        match self {
            Periodicity::Infinity | Periodicity::Daily | Periodicity::Weekly => 0,
            Periodicity::Monthly => 1,
            Periodicity::Quarterly => 3,
            Periodicity::SemiAnnual => 6,
            Periodicity::Annual => 12,
        }
    }

    /// Fixed day step for the sub-monthly frequencies.
    pub fn days(&self) -> Option<u32> {
        match self {
            Periodicity::Daily => Some(1),
            Periodicity::Weekly => Some(7),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RateType {
    VariableRate,
    FixedRate,
}

impl RateType {
    pub fn label(&self) -> &'static str {
        match self {
            RateType::VariableRate => "Variable",
            RateType::FixedRate => "Taux fixe",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SettlementMethod {
    Cash,
    Physical,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollateralMethod {
    #[default]
    #[serde(rename = "CASHCOLLATERAL")]
    CashCollateral,
    #[serde(rename = "SECCOLLATERAL")]
    SecuritiesCollateral,
    #[serde(rename = "SECCASHCOLLATERAL")]
    SecuritiesAndCashCollateral,
}

/// How the initial deposit of a future is expressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DepositType {
    Amount,
    #[default]
    Rate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnderlyingType {
    Equities,
    Bonds,
    Futures,
    Commodities,
    Index,
    Rights,
    Currency,
    #[serde(rename = "MP")]
    PrimaryMarket,
    InterestRate,
    #[serde(rename = "ETF")]
    Etf,
    StockNot,
}
