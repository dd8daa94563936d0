//! Retail customers
//!
//! Customers are supplied to the investment path as validated references;
//! the record here only carries what the customer fund totals denormalise.

use serde::{Deserialize, Serialize};

use core_kernel::CustomerId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetailCustomer {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Customer details before the store assigns an id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRetailCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl NewRetailCustomer {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }
}

impl RetailCustomer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
