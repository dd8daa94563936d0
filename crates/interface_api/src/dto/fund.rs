//! Fund DTOs

use rust_decimal::Decimal;
use serde::Serialize;

use core_kernel::FundId;
use domain_investment::Fund;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundResponse {
    pub id: FundId,
    pub name: String,
    pub description: Option<String>,
    pub min_investment: Decimal,
    pub is_active: bool,
}

impl From<Fund> for FundResponse {
    fn from(fund: Fund) -> Self {
        Self {
            id: fund.id,
            name: fund.name,
            description: fund.description,
            min_investment: fund.min_investment,
            is_active: fund.is_active,
        }
    }
}
