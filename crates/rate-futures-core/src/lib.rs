//! Theoretical pricing of bond-backed interest-rate futures.
//!
//! A [`Future`](instruments::Future) written on a [`Bond`](instruments::Bond)
//! is priced from the bond's clean price, accrued interest and discounted
//! coupons, grown at the risk-free rate to the future's maturity. Contract
//! value and initial margin follow from the price.

pub mod clock;
pub mod config;
pub mod error;
pub mod instruments;
pub mod pricing;
pub mod time_value;
pub mod types;
pub mod workflow;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::PricingConfig;
pub use error::RateFuturesError;
pub use pricing::{PriceComponents, PricingEngine};
pub use types::*;

/// Standard result type for all rate-futures operations
pub type RateFuturesResult<T> = Result<T, RateFuturesError>;
