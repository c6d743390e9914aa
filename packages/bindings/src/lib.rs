use chrono::NaiveDate;
use napi::Result as NapiResult;
use napi_derive::napi;
use serde_json::json;

use rate_futures_core::instruments::schedule::{self, CouponScheduleInput};
use rate_futures_core::pricing::report::{
    self, AccruedInterestInput, CouponPvInput, FuturePricingInput,
};
use rate_futures_core::workflow::{
    self, FutureCreationRequest, FutureDisplay, UnderlyingCatalog, UnderlyingSource,
};
use rate_futures_core::{Clock, FixedClock, PricingConfig, PricingEngine};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Default config unless the caller passes one as JSON.
fn parse_config(config_json: Option<String>) -> NapiResult<PricingConfig> {
    match config_json {
        Some(raw) => PricingConfig::from_json_str(&raw).map_err(to_napi_error),
        None => Ok(PricingConfig::default()),
    }
}

// ---------------------------------------------------------------------------
// Pricing
// ---------------------------------------------------------------------------

#[napi]
pub fn price_future(input_json: String, config_json: Option<String>) -> NapiResult<String> {
    let input: FuturePricingInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let config = parse_config(config_json)?;
    let output = report::price_future(&input, &config).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn accrued_interest(input_json: String, config_json: Option<String>) -> NapiResult<String> {
    let input: AccruedInterestInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let config = parse_config(config_json)?;
    let output = report::accrued_interest(&input, &config).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn coupon_pv(input_json: String, config_json: Option<String>) -> NapiResult<String> {
    let input: CouponPvInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let config = parse_config(config_json)?;
    let output = report::coupon_present_value(&input, &config).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

#[napi]
pub fn coupon_schedule(input_json: String) -> NapiResult<String> {
    let input: CouponScheduleInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let coupons = schedule::generate_coupon_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&coupons).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Creation workflow
// ---------------------------------------------------------------------------

/// `underlyings_json` is the catalog as a JSON array. Without a valuation
/// date the engine prices as of today.
#[napi]
pub fn create_future(
    request_json: String,
    underlyings_json: String,
    valuation_date: Option<String>,
    config_json: Option<String>,
) -> NapiResult<String> {
    let request: FutureCreationRequest =
        serde_json::from_str(&request_json).map_err(to_napi_error)?;
    let catalog: UnderlyingCatalog =
        serde_json::from_str(&underlyings_json).map_err(to_napi_error)?;
    let config = parse_config(config_json)?;

    match valuation_date {
        Some(raw) => {
            let date: NaiveDate = raw.parse().map_err(to_napi_error)?;
            create_with(&request, &catalog, &PricingEngine::with_clock(config, FixedClock(date)))
        }
        None => create_with(&request, &catalog, &PricingEngine::new(config)),
    }
}

fn create_with<C: Clock>(
    request: &FutureCreationRequest,
    catalog: &UnderlyingCatalog,
    engine: &PricingEngine<C>,
) -> NapiResult<String> {
    let created = workflow::create_future(request, catalog, engine).map_err(to_napi_error)?;
    let display = FutureDisplay::new(
        &created.future,
        catalog.find_underlying(request.underlying_id),
    );
    let output = json!({
        "future": created.future,
        "pricing": created.pricing,
        "display": display,
    });
    serde_json::to_string(&output).map_err(to_napi_error)
}
