use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::Money;

/// A scheduled coupon payment. It has no identity of its own: it lives and
/// dies with the bond schedule that holds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlow {
    pub payment_date: NaiveDate,
    pub amount: Money,
}

impl CashFlow {
    pub fn new(payment_date: NaiveDate, amount: Money) -> Self {
        CashFlow {
            payment_date,
            amount,
        }
    }
}
