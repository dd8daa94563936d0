//! Investment records
//!
//! Investments are append-only: they are created through
//! [`InvestmentPort::create_investment`](crate::InvestmentPort::create_investment)
//! and never updated or deleted.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{CustomerId, FundId, InvestmentId};

use crate::error::InvestmentError;
use crate::round_amount;

/// Lifecycle tag of an investment
///
/// No transitions are defined yet. Every investment is created `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentStatus {
    #[default]
    Pending,
    Settled,
    Rejected,
}

/// A committed investment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Investment {
    pub id: InvestmentId,
    pub customer_id: CustomerId,
    pub fund_id: FundId,
    pub amount: Decimal,
    /// Assigned by the record store on insert
    pub created_at: DateTime<Utc>,
    pub status: InvestmentStatus,
}

/// An investment that has passed validation but is not yet stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInvestment {
    pub id: InvestmentId,
    pub customer_id: CustomerId,
    pub fund_id: FundId,
    pub amount: Decimal,
    pub status: InvestmentStatus,
}

impl NewInvestment {
    /// Creates a pending investment with a fresh time-ordered id
    pub fn new(customer_id: CustomerId, fund_id: FundId, amount: Decimal) -> Self {
        Self {
            id: InvestmentId::new_v7(),
            customer_id,
            fund_id,
            amount,
            status: InvestmentStatus::Pending,
        }
    }
}

/// Incoming request to invest, as decoded from the outside world
///
/// Every field is optional so that a missing field surfaces as a
/// validation error rather than a decoding failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvestmentRequest {
    pub customer_id: Option<CustomerId>,
    pub fund_id: Option<FundId>,
    pub amount: Option<Decimal>,
}

impl CreateInvestmentRequest {
    pub fn new(customer_id: CustomerId, fund_id: FundId, amount: Decimal) -> Self {
        Self {
            customer_id: Some(customer_id),
            fund_id: Some(fund_id),
            amount: Some(amount),
        }
    }

    /// Checks the request shape and builds the investment to store
    ///
    /// # Errors
    ///
    /// Returns `InvestmentError::Validation` naming the first missing field,
    /// or `amount` when it is not positive at currency precision.
    pub fn validate(self) -> Result<NewInvestment, InvestmentError> {
        let customer_id = self
            .customer_id
            .ok_or_else(|| InvestmentError::validation("customerId", "is required"))?;
        let fund_id = self
            .fund_id
            .ok_or_else(|| InvestmentError::validation("fundId", "is required"))?;
        let amount = self
            .amount
            .map(round_amount)
            .ok_or_else(|| InvestmentError::validation("amount", "is required"))?;

        if amount <= Decimal::ZERO {
            return Err(InvestmentError::validation("amount", "must be greater than zero"));
        }

        Ok(NewInvestment::new(customer_id, fund_id, amount))
    }
}
