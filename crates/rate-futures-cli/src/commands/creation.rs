use chrono::NaiveDate;
use clap::Args;
use serde_json::{json, Value};

use rate_futures_core::workflow::{
    create_future, FutureCreationRequest, FutureDisplay, UnderlyingCatalog, UnderlyingSource,
};
use rate_futures_core::{Clock, FixedClock, PricingConfig, PricingEngine};

use crate::input;

/// Arguments for creating and pricing a future against an underlying catalog
#[derive(Args)]
pub struct CreateFutureArgs {
    /// Path to JSON creation request
    #[arg(long)]
    pub input: Option<String>,

    /// Path to JSON array of underlyings
    #[arg(long)]
    pub underlyings: String,

    /// Price as of this date instead of today (YYYY-MM-DD)
    #[arg(long)]
    pub valuation_date: Option<NaiveDate>,
}

pub fn run_create_future(
    args: CreateFutureArgs,
    config: &PricingConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let request: FutureCreationRequest = input::load(args.input.as_deref(), "create-future")?;
    let catalog: UnderlyingCatalog = input::read_json(&args.underlyings)?;

    match args.valuation_date {
        Some(date) => {
            let engine = PricingEngine::with_clock(config.clone(), FixedClock(date));
            create_with(&request, &catalog, &engine)
        }
        None => create_with(&request, &catalog, &PricingEngine::new(config.clone())),
    }
}

fn create_with<C: Clock>(
    request: &FutureCreationRequest,
    catalog: &UnderlyingCatalog,
    engine: &PricingEngine<C>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let created = create_future(request, catalog, engine)?;
    let underlying = catalog.find_underlying(request.underlying_id);
    let display = FutureDisplay::new(&created.future, underlying);

    Ok(json!({
        "result": display,
        "pricing": created.pricing,
        "future": created.future,
    }))
}
