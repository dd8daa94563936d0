//! Customer fund totals
//!
//! The total is a projection of the investment rows, never written on its
//! own. After every committed investment, `total_investment` equals the sum
//! of all committed amounts for the customer and fund.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{CustomerId, FundId};

use crate::investment::Investment;

/// Running total invested by one customer in one fund, with the customer
/// and fund names denormalised for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerFundTotal {
    pub customer_id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub fund_id: FundId,
    pub fund_name: String,
    pub total_investment: Decimal,
}

impl CustomerFundTotal {
    /// Sums the amounts of `investments` belonging to the pair
    pub fn sum_for<'a>(
        investments: impl IntoIterator<Item = &'a Investment>,
        customer_id: CustomerId,
        fund_id: FundId,
    ) -> Decimal {
        investments
            .into_iter()
            .filter(|i| i.customer_id == customer_id && i.fund_id == fund_id)
            .map(|i| i.amount)
            .sum()
    }
}
