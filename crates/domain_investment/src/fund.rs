//! Investable funds

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::FundId;

/// A fund customers can invest in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fund {
    pub id: FundId,
    pub name: String,
    pub description: Option<String>,
    /// Smallest single investment the fund advertises
    pub min_investment: Decimal,
    pub is_active: bool,
}

impl Fund {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: FundId::new_v7(),
            name: name.into(),
            description: None,
            min_investment: Decimal::ZERO,
            is_active: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_min_investment(mut self, min_investment: Decimal) -> Self {
        self.min_investment = min_investment;
        self
    }
}
