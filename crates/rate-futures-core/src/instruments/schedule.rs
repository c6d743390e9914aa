//! Regular coupon schedule generation.
//!
//! Coupon dates are rolled backwards from maturity so that any irregular
//! (short) period falls at the front. Month-based frequencies step from
//! maturity by whole multiples of the period, so end-of-month clamping on
//! one date never drifts into the next.

use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::bond::Bond;
use super::cashflow::CashFlow;
use super::enums::Periodicity;
use crate::error::RateFuturesError;
use crate::types::Money;
use crate::RateFuturesResult;

/// Terms needed to lay out a fixed coupon schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouponScheduleInput {
    /// Accrual start; no coupon is generated on or before this date.
    pub start_date: NaiveDate,
    pub maturity_date: NaiveDate,
    pub periodicity: Periodicity,
    pub coupon_amount: Money,
}

/// Build the coupon cash flows in `(start_date, maturity_date]`, oldest first.
pub fn generate_coupon_schedule(input: &CouponScheduleInput) -> RateFuturesResult<Vec<CashFlow>> {
    if input.maturity_date <= input.start_date {
        return Err(RateFuturesError::InvalidInput {
            field: "maturity_date".into(),
            reason: "Maturity must be after the start date".into(),
        });
    }

    let dates = match (input.periodicity.days(), input.periodicity.months()) {
        (Some(step), _) => roll_back_days(input.start_date, input.maturity_date, step),
        (None, months) if months > 0 => {
            roll_back_months(input.start_date, input.maturity_date, months)?
        }
        _ => {
            return Err(RateFuturesError::InvalidInput {
                field: "periodicity".into(),
                reason: format!("{:?} has no regular coupon dates", input.periodicity),
            })
        }
    };

    Ok(dates
        .into_iter()
        .map(|date| CashFlow::new(date, input.coupon_amount))
        .collect())
}

fn roll_back_days(start: NaiveDate, maturity: NaiveDate, step: u32) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut date = maturity;
    while date > start {
        dates.push(date);
        date -= Duration::days(step as i64);
    }
    dates.reverse();
    dates
}

fn roll_back_months(
    start: NaiveDate,
    maturity: NaiveDate,
    months: u32,
) -> RateFuturesResult<Vec<NaiveDate>> {
    let mut dates = Vec::new();
    let mut periods: u32 = 0;
    loop {
        let offset = periods.checked_mul(months).ok_or_else(|| {
            RateFuturesError::DateError("Coupon schedule exceeds representable range".into())
        })?;
        let date = maturity.checked_sub_months(Months::new(offset)).ok_or_else(|| {
            RateFuturesError::DateError(format!("Cannot roll {maturity} back by {offset} months"))
        })?;
        if date <= start {
            break;
        }
        dates.push(date);
        periods += 1;
    }
    dates.reverse();
    Ok(dates)
}

impl Bond {
    /// Regenerate `future_coupons` from the bond's own dated date, maturity,
    /// periodicity and coupon amount.
    pub fn generate_schedule(&mut self) -> RateFuturesResult<()> {
        let input = CouponScheduleInput {
            start_date: required(self.dated_date, "dated_date")?,
            maturity_date: required(self.maturity_date, "maturity_date")?,
            periodicity: required(self.periodicity, "periodicity")?,
            coupon_amount: required(self.coupon_amount, "coupon_amount")?,
        };
        let coupons = generate_coupon_schedule(&input)?;
        self.set_coupons(coupons);
        Ok(())
    }
}

fn required<T>(value: Option<T>, field: &str) -> RateFuturesResult<T> {
    value.ok_or_else(|| RateFuturesError::InvalidInput {
        field: field.into(),
        reason: "Required to generate a coupon schedule".into(),
    })
}
