//! Investment DTOs
//!
//! Requests deserialize straight into
//! [`CreateInvestmentRequest`](domain_investment::CreateInvestmentRequest);
//! the responses here fix the camelCase wire shape.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use core_kernel::{CustomerId, FundId, InvestmentId};
use domain_investment::{CustomerFundTotal, Investment, InvestmentStatus};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentResponse {
    pub id: InvestmentId,
    pub customer_id: CustomerId,
    pub fund_id: FundId,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub status: InvestmentStatus,
}

impl From<Investment> for InvestmentResponse {
    fn from(investment: Investment) -> Self {
        Self {
            id: investment.id,
            customer_id: investment.customer_id,
            fund_id: investment.fund_id,
            amount: investment.amount,
            created_at: investment.created_at,
            status: investment.status,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerFundTotalResponse {
    pub customer_id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub fund_id: FundId,
    pub fund_name: String,
    pub total_investment: Decimal,
}

impl From<CustomerFundTotal> for CustomerFundTotalResponse {
    fn from(total: CustomerFundTotal) -> Self {
        Self {
            customer_id: total.customer_id,
            first_name: total.first_name,
            last_name: total.last_name,
            email: total.email,
            fund_id: total.fund_id,
            fund_name: total.fund_name,
            total_investment: total.total_investment,
        }
    }
}
