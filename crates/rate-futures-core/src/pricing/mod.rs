pub mod engine;
pub mod report;

pub use engine::{PriceComponents, PricingEngine};
