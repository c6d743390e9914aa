pub mod asset;
pub mod bond;
pub mod cashflow;
pub mod enums;
pub mod future;
pub mod schedule;
pub mod underlying;

pub use asset::AssetInfo;
pub use bond::Bond;
pub use cashflow::CashFlow;
pub use enums::{CollateralMethod, DepositType, Periodicity, RateType, SettlementMethod, UnderlyingType};
pub use future::Future;
pub use underlying::{Underlying, UnderlyingAsset};
