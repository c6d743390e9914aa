use clap::Args;
use serde_json::Value;

use rate_futures_core::instruments::schedule::{self, CouponScheduleInput};

use crate::input;

/// Arguments for regular coupon schedule generation
#[derive(Args)]
pub struct CouponScheduleArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_coupon_schedule(args: CouponScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let schedule_input: CouponScheduleInput =
        input::load(args.input.as_deref(), "coupon-schedule")?;
    let coupons = schedule::generate_coupon_schedule(&schedule_input)?;
    Ok(serde_json::to_value(coupons)?)
}
