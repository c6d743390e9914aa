pub mod catalog;
pub mod creation;
pub mod display;

pub use catalog::{UnderlyingCatalog, UnderlyingSource};
pub use creation::{create_future, CreatedFuture, FutureCreationRequest, PricingOutcome};
pub use display::FutureDisplay;
