//! Pre-built Test Fixtures
//!
//! Customers, funds and requests for tests. Names and emails come from
//! `fake`; emails are prefixed with a random token so fixtures never trip
//! the unique email constraint.

use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use core_kernel::{CustomerId, FundId};
use domain_investment::{CreateInvestmentRequest, Fund, NewRetailCustomer, RetailCustomer};

/// Fixture for retail customers
pub struct CustomerFixtures;

impl CustomerFixtures {
    /// Customer details with a unique email, ready to insert
    pub fn new_customer() -> NewRetailCustomer {
        NewRetailCustomer::new(
            FirstName().fake::<String>(),
            LastName().fake::<String>(),
            unique_email(),
        )
    }

    /// A customer with an id already assigned, for in-memory ports
    pub fn customer() -> RetailCustomer {
        let new = Self::new_customer();
        RetailCustomer {
            id: CustomerId::new_v7(),
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
        }
    }
}

/// Fixture for funds
pub struct FundFixtures;

impl FundFixtures {
    pub fn equities() -> Fund {
        Fund::new("Cushon Equities Fund")
            .with_description("Global equities tracker")
            .with_min_investment(dec!(25))
    }

    pub fn bonds() -> Fund {
        Fund::new("Cushon Bond Fund").with_description("Investment grade bonds")
    }

    pub fn cash() -> Fund {
        Fund::new("Cushon Cash Fund")
    }
}

/// Fixture for investment requests
pub struct InvestmentFixtures;

impl InvestmentFixtures {
    /// Amount used by the standard scenarios
    pub fn standard_amount() -> Decimal {
        dec!(25000.00)
    }

    pub fn request(customer_id: CustomerId, fund_id: FundId, amount: Decimal) -> CreateInvestmentRequest {
        CreateInvestmentRequest::new(customer_id, fund_id, amount)
    }
}

fn unique_email() -> String {
    let email: String = SafeEmail().fake();
    format!("{}.{}", &Uuid::new_v4().simple().to_string()[..8], email)
}
