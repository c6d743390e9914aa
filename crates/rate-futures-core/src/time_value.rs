use chrono::NaiveDate;
use rust_decimal::prelude::RoundingStrategy;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::config::check_rate;
use crate::error::RateFuturesError;
use crate::types::{Rate, Years};
use crate::RateFuturesResult;

/// Simple day-fraction denominator. This is not a day-count convention,
/// just calendar days over a fixed 365-day year.
pub const DAYS_PER_YEAR: Decimal = dec!(365);

/// Whole calendar days from `from` to `to` (negative when `to` is earlier).
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Unrounded `days / 365` year fraction.
pub fn year_fraction(from: NaiveDate, to: NaiveDate) -> Years {
    Decimal::from(days_between(from, to)) / DAYS_PER_YEAR
}

/// `days / 365` rounded half-up to `scale` places.
pub fn year_fraction_at_scale(from: NaiveDate, to: NaiveDate, scale: u32) -> Years {
    round_half_up(year_fraction(from, to), scale)
}

/// Round half away from zero, the decimal equivalent of HALF_UP.
pub fn round_half_up(value: Decimal, scale: u32) -> Decimal {
    value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero)
}

/// Annual-compounding discount divisor `(1 + r)^t`, with `t` allowed to be
/// fractional or negative.
pub fn compounding_factor(rate: Rate, years: Years) -> RateFuturesResult<Decimal> {
    check_rate("rate", rate)?;
    Decimal::ONE
        .checked_add(rate)
        .and_then(|base| base.checked_powd(years))
        .ok_or_else(|| RateFuturesError::ArithmeticOverflow {
            context: format!("(1 + {rate})^{years}"),
        })
}

/// Continuous-compounding growth `e^(r * t)`.
pub fn continuous_growth_factor(rate: Rate, years: Years) -> RateFuturesResult<Decimal> {
    let exponent = rate
        .checked_mul(years)
        .ok_or_else(|| RateFuturesError::ArithmeticOverflow {
            context: format!("{rate} * {years}"),
        })?;
    exponent
        .checked_exp()
        .ok_or_else(|| RateFuturesError::ArithmeticOverflow {
            context: format!("exp({exponent})"),
        })
}
