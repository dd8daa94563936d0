//! Fund restriction rule
//!
//! A customer may by default invest in one fund only. The rule is kept in
//! this one place so relaxing it is a configuration change: adapters call
//! [`FundRestriction::check`] and nothing else in the write path knows the
//! rule exists.

use serde::{Deserialize, Serialize};

use core_kernel::{CustomerId, FundId};

use crate::error::InvestmentError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FundRestriction {
    /// All of a customer's investments must go into the same fund
    #[default]
    SingleFund,
    /// Customers may spread investments across funds
    Unrestricted,
}

impl FundRestriction {
    pub fn from_single_fund_flag(single_fund_only: bool) -> Self {
        if single_fund_only {
            FundRestriction::SingleFund
        } else {
            FundRestriction::Unrestricted
        }
    }

    /// Whether adapters need to look up the customer's existing fund at all
    pub fn needs_existing_fund(&self) -> bool {
        matches!(self, FundRestriction::SingleFund)
    }

    /// Decides whether `requested` is allowed given the fund the customer
    /// already invests in, if any
    ///
    /// # Errors
    ///
    /// Returns `InvestmentError::DifferentFundNotAllowed` when the rule is
    /// `SingleFund` and `existing` names another fund.
    pub fn check(
        &self,
        customer_id: CustomerId,
        existing: Option<FundId>,
        requested: FundId,
    ) -> Result<(), InvestmentError> {
        match (self, existing) {
            (FundRestriction::SingleFund, Some(existing_fund_id)) if existing_fund_id != requested => {
                Err(InvestmentError::DifferentFundNotAllowed {
                    customer_id,
                    existing_fund_id,
                    requested_fund_id: requested,
                })
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_investment_is_allowed() {
        let rule = FundRestriction::SingleFund;
        assert!(rule.check(CustomerId::new(), None, FundId::new()).is_ok());
    }

    #[test]
    fn test_same_fund_is_allowed() {
        let fund = FundId::new();
        assert!(FundRestriction::SingleFund.check(CustomerId::new(), Some(fund), fund).is_ok());
    }

    #[test]
    fn test_other_fund_is_rejected() {
        let result = FundRestriction::SingleFund.check(CustomerId::new(), Some(FundId::new()), FundId::new());
        assert!(result.unwrap_err().is_invariant_violation());
    }

    #[test]
    fn test_unrestricted_allows_other_fund() {
        let result = FundRestriction::Unrestricted.check(CustomerId::new(), Some(FundId::new()), FundId::new());
        assert!(result.is_ok());
        assert!(!FundRestriction::Unrestricted.needs_existing_fund());
    }
}
