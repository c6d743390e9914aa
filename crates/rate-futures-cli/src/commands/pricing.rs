use clap::Args;
use serde_json::Value;

use rate_futures_core::pricing::report::{
    self, AccruedInterestInput, CouponPvInput, FuturePricingInput,
};
use rate_futures_core::PricingConfig;

use crate::input;

/// Arguments for a full future pricing pass
#[derive(Args)]
pub struct PriceFutureArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_price_future(
    args: PriceFutureArgs,
    config: &PricingConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let pricing_input: FuturePricingInput = input::load(args.input.as_deref(), "price-future")?;
    let result = report::price_future(&pricing_input, config)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for accrued interest on a bond
#[derive(Args)]
pub struct AccruedInterestArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_accrued_interest(
    args: AccruedInterestArgs,
    config: &PricingConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let accrual_input: AccruedInterestInput =
        input::load(args.input.as_deref(), "accrued-interest")?;
    let result = report::accrued_interest(&accrual_input, config)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for the present value of a bond's coupons
#[derive(Args)]
pub struct CouponPvArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_coupon_pv(
    args: CouponPvArgs,
    config: &PricingConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let pv_input: CouponPvInput = input::load(args.input.as_deref(), "coupon-pv")?;
    let result = report::coupon_present_value(&pv_input, config)?;
    Ok(serde_json::to_value(result)?)
}
