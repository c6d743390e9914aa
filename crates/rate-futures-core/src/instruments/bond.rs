//! Bond underlying and its coupon-schedule helpers.
//!
//! The schedule is an owned, date-ordered vector of [`CashFlow`] values.
//! Accrued interest and coupon present value are both measured against an
//! explicit `today`; the bond never consults a clock itself.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::asset::AssetInfo;
use super::cashflow::CashFlow;
use super::enums::{Periodicity, RateType};
use crate::error::RateFuturesError;
use crate::time_value::{compounding_factor, days_between, round_half_up, year_fraction};
use crate::types::{Money, Rate};
use crate::RateFuturesResult;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bond {
    #[serde(flatten)]
    pub asset: AssetInfo,
    /// Face value. Carried for completeness; the future price does not use it.
    pub nominal: Option<Money>,
    /// Fixed amount paid on every coupon date, used for accrual.
    pub coupon_amount: Option<Money>,
    pub periodicity: Option<Periodicity>,
    pub maturity_date: Option<NaiveDate>,
    /// Start of the first accrual period.
    pub dated_date: Option<NaiveDate>,
    /// Clean price (quoted without accrued interest).
    pub underlying_price: Option<Money>,
    pub rate_type: Option<RateType>,
    /// Reference rate for variable-rate bonds. Not used by pricing yet.
    pub index_rate: Option<Rate>,
    #[serde(default, deserialize_with = "deserialize_sorted_coupons")]
    future_coupons: Vec<CashFlow>,
}

fn deserialize_sorted_coupons<'de, D>(deserializer: D) -> Result<Vec<CashFlow>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut coupons = Vec::<CashFlow>::deserialize(deserializer)?;
    coupons.sort_by_key(|cf| cf.payment_date);
    Ok(coupons)
}

impl Bond {
    pub fn new(asset: AssetInfo) -> Self {
        Bond {
            asset,
            ..Bond::default()
        }
    }

    pub fn with_clean_price(mut self, price: Money) -> Self {
        self.underlying_price = Some(price);
        self
    }

    pub fn with_coupon_amount(mut self, amount: Money) -> Self {
        self.coupon_amount = Some(amount);
        self
    }

    pub fn with_coupons(mut self, coupons: Vec<CashFlow>) -> Self {
        self.set_coupons(coupons);
        self
    }

    /// Coupon schedule, ordered by payment date.
    pub fn future_coupons(&self) -> &[CashFlow] {
        &self.future_coupons
    }

    /// Replace the whole schedule.
    pub fn set_coupons(&mut self, mut coupons: Vec<CashFlow>) {
        coupons.sort_by_key(|cf| cf.payment_date);
        self.future_coupons = coupons;
    }

    /// Insert one coupon, keeping date order. Equal dates keep insertion order.
    pub fn add_coupon(&mut self, coupon: CashFlow) {
        let idx = self
            .future_coupons
            .partition_point(|cf| cf.payment_date <= coupon.payment_date);
        self.future_coupons.insert(idx, coupon);
    }

    pub fn clear_coupons(&mut self) {
        self.future_coupons.clear();
    }

    /// Earliest coupon date on or after `today`.
    pub fn next_coupon_date(&self, today: NaiveDate) -> Option<NaiveDate> {
        let idx = self
            .future_coupons
            .partition_point(|cf| cf.payment_date < today);
        self.future_coupons.get(idx).map(|cf| cf.payment_date)
    }

    /// Latest coupon date strictly before `today`.
    pub fn last_coupon_date(&self, today: NaiveDate) -> Option<NaiveDate> {
        let idx = self
            .future_coupons
            .partition_point(|cf| cf.payment_date < today);
        idx.checked_sub(1)
            .map(|last| self.future_coupons[last].payment_date)
    }

    /// Sum of every scheduled coupon discounted to `today` at `rate`.
    ///
    /// Each coupon contributes `amount / (1 + rate)^(days / 365)`, and the
    /// running total is rounded half-up to `working_scale` after every
    /// addition. Coupons dated before `today` are not skipped: their
    /// negative exponent compounds them forward instead of discounting.
    pub fn present_value_of_coupons(
        &self,
        rate: Rate,
        today: NaiveDate,
        working_scale: u32,
    ) -> RateFuturesResult<Money> {
        let mut pv = Decimal::ZERO;
        for coupon in &self.future_coupons {
            let years = year_fraction(today, coupon.payment_date);
            let divisor = compounding_factor(rate, years)?;
            let discounted = coupon.amount.checked_div(divisor).ok_or_else(|| {
                RateFuturesError::ArithmeticOverflow {
                    context: format!("discounting coupon of {}", coupon.payment_date),
                }
            })?;
            let total = pv.checked_add(discounted).ok_or_else(|| {
                RateFuturesError::ArithmeticOverflow {
                    context: format!("summing coupon PV at {}", coupon.payment_date),
                }
            })?;
            pv = round_half_up(total, working_scale);
        }
        Ok(pv)
    }

    /// Share of the coupon earned between the last coupon date and `today`.
    ///
    /// Zero when there is no coupon amount, or when the schedule has no
    /// coupon on either side of `today`. A zero-day period between the last
    /// and next coupon is rejected.
    pub fn accrued_interest(&self, today: NaiveDate) -> RateFuturesResult<Money> {
        let coupon_amount = match self.coupon_amount {
            Some(amount) => amount,
            None => return Ok(Decimal::ZERO),
        };
        let (last, next) = match (self.last_coupon_date(today), self.next_coupon_date(today)) {
            (Some(last), Some(next)) => (last, next),
            _ => return Ok(Decimal::ZERO),
        };

        prorate_coupon(coupon_amount, last, next, today)
    }
}

/// `coupon_amount × (today − last) / (next − last)` in whole days.
///
/// Fails with [`RateFuturesError::InvalidSchedule`] when `last` and `next`
/// coincide.
pub fn prorate_coupon(
    coupon_amount: Money,
    last_coupon: NaiveDate,
    next_coupon: NaiveDate,
    today: NaiveDate,
) -> RateFuturesResult<Money> {
    let days_total = days_between(last_coupon, next_coupon);
    if days_total == 0 {
        return Err(RateFuturesError::InvalidSchedule {
            last_coupon,
            next_coupon,
        });
    }
    let days_elapsed = days_between(last_coupon, today);

    coupon_amount
        .checked_mul(Decimal::from(days_elapsed))
        .and_then(|earned| earned.checked_div(Decimal::from(days_total)))
        .ok_or_else(|| RateFuturesError::ArithmeticOverflow {
            context: format!("accruing coupon from {last_coupon} to {today}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 16).unwrap()
    }

    fn coupon(offset_days: i64, amount: Money) -> CashFlow {
        CashFlow::new(today() + Duration::days(offset_days), amount)
    }

    fn bond_with(coupons: Vec<CashFlow>) -> Bond {
        Bond::new(AssetInfo::with_symbol("OAT-2030"))
            .with_coupon_amount(dec!(100))
            .with_coupons(coupons)
    }

    #[test]
    fn test_schedule_is_kept_sorted() {
        let mut bond = bond_with(vec![coupon(200, dec!(5)), coupon(-10, dec!(5)), coupon(20, dec!(5))]);
        bond.add_coupon(coupon(50, dec!(5)));
        let offsets: Vec<i64> = bond
            .future_coupons()
            .iter()
            .map(|cf| (cf.payment_date - today()).num_days())
            .collect();
        assert_eq!(offsets, vec![-10, 20, 50, 200]);
    }

    #[test]
    fn test_next_coupon_includes_today() {
        let bond = bond_with(vec![coupon(-30, dec!(5)), coupon(0, dec!(5)), coupon(30, dec!(5))]);
        assert_eq!(bond.next_coupon_date(today()), Some(today()));
        assert_eq!(bond.last_coupon_date(today()), Some(today() - Duration::days(30)));
    }

    #[test]
    fn test_coupon_dates_absent() {
        let empty = bond_with(vec![]);
        assert_eq!(empty.next_coupon_date(today()), None);
        assert_eq!(empty.last_coupon_date(today()), None);

        let all_past = bond_with(vec![coupon(-90, dec!(5)), coupon(-1, dec!(5))]);
        assert_eq!(all_past.next_coupon_date(today()), None);
        assert_eq!(all_past.last_coupon_date(today()), Some(today() - Duration::days(1)));

        let all_future = bond_with(vec![coupon(1, dec!(5))]);
        assert_eq!(all_future.last_coupon_date(today()), None);
    }

    #[test]
    fn test_empty_schedule_is_neutral() {
        let bond = bond_with(vec![]);
        assert_eq!(bond.present_value_of_coupons(dec!(0.03), today(), 10).unwrap(), Decimal::ZERO);
        assert_eq!(bond.accrued_interest(today()).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_single_coupon_one_year_out() {
        let bond = bond_with(vec![coupon(365, dec!(100))]);
        let pv = bond.present_value_of_coupons(dec!(0.03), today(), 10).unwrap();
        assert_eq!(round_half_up(pv, 4), dec!(97.0874));
    }

    #[test]
    fn test_coupon_paid_today_is_not_discounted() {
        let bond = bond_with(vec![coupon(0, dec!(42.5))]);
        let pv = bond.present_value_of_coupons(dec!(0.03), today(), 10).unwrap();
        assert_eq!(pv, dec!(42.5));
    }

    #[test]
    fn test_past_coupon_is_compounded_forward() {
        let bond = bond_with(vec![coupon(-365, dec!(100))]);
        let pv = bond.present_value_of_coupons(dec!(0.03), today(), 10).unwrap();
        assert_eq!(pv, dec!(103));
    }

    #[test]
    fn test_pv_rounds_running_sum() {
        let bond = bond_with(vec![coupon(365, dec!(100)), coupon(730, dec!(100))]);
        let pv = bond.present_value_of_coupons(dec!(0.03), today(), 2).unwrap();
        // 97.087378... -> 97.09, then + 94.259590... -> 191.35
        assert_eq!(pv, dec!(191.35));
    }

    #[test]
    fn test_accrual_midpoint() {
        let bond = bond_with(vec![coupon(-50, dec!(100)), coupon(40, dec!(100))]);
        let ai = bond.accrued_interest(today()).unwrap();
        assert_eq!(round_half_up(ai, 4), dec!(55.5556));
    }

    #[test]
    fn test_accrual_on_coupon_date_is_full_period_from_last() {
        // Next coupon is today itself, so the whole period has elapsed
        let bond = bond_with(vec![coupon(-90, dec!(100)), coupon(0, dec!(100))]);
        assert_eq!(bond.accrued_interest(today()).unwrap(), dec!(100));
    }

    #[test]
    fn test_accrual_without_coupon_amount() {
        let mut bond = bond_with(vec![coupon(-50, dec!(100)), coupon(40, dec!(100))]);
        bond.coupon_amount = None;
        assert_eq!(bond.accrued_interest(today()).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_accrual_needs_both_sides() {
        let only_future = bond_with(vec![coupon(40, dec!(100))]);
        assert_eq!(only_future.accrued_interest(today()).unwrap(), Decimal::ZERO);
        let only_past = bond_with(vec![coupon(-40, dec!(100))]);
        assert_eq!(only_past.accrued_interest(today()).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_zero_day_period_is_rejected() {
        let d = today() - Duration::days(10);
        let err = prorate_coupon(dec!(100), d, d, today()).unwrap_err();
        match err {
            RateFuturesError::InvalidSchedule {
                last_coupon,
                next_coupon,
            } => {
                assert_eq!(last_coupon, d);
                assert_eq!(next_coupon, d);
            }
            other => panic!("expected InvalidSchedule, got {other:?}"),
        }
    }

    #[test]
    fn test_accrual_overflow_is_an_error() {
        let bond = Bond::new(AssetInfo::default())
            .with_coupon_amount(Decimal::MAX / dec!(10))
            .with_coupons(vec![coupon(-50, dec!(1)), coupon(40, dec!(1))]);
        let err = bond.accrued_interest(today()).unwrap_err();
        assert!(matches!(err, RateFuturesError::ArithmeticOverflow { .. }));
    }

    #[test]
    fn test_pv_sum_overflow_is_an_error() {
        let bond = bond_with(vec![coupon(0, Decimal::MAX), coupon(0, Decimal::MAX)]);
        let err = bond.present_value_of_coupons(dec!(0.03), today(), 10).unwrap_err();
        assert!(matches!(err, RateFuturesError::ArithmeticOverflow { .. }));
    }

    #[test]
    fn test_prorate_coupon_quarter() {
        let last = today() - Duration::days(30);
        let next = today() + Duration::days(90);
        assert_eq!(prorate_coupon(dec!(4), last, next, today()).unwrap(), dec!(1));
    }

    #[test]
    fn test_deserialized_schedule_is_sorted() {
        let json = r#"{
            "symbol": "BTP-2031",
            "coupon_amount": "2.5",
            "future_coupons": [
                { "payment_date": "2026-06-01", "amount": "2.5" },
                { "payment_date": "2025-12-01", "amount": "2.5" }
            ]
        }"#;
        let bond: Bond = serde_json::from_str(json).unwrap();
        assert_eq!(bond.asset.symbol.as_deref(), Some("BTP-2031"));
        assert_eq!(
            bond.future_coupons()[0].payment_date,
            NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()
        );
        assert_eq!(bond.underlying_price, None);
    }
}
