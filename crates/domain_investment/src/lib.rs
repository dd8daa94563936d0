//! Investment Domain
//!
//! This crate owns the rules of the investment write path and the shapes
//! that flow through it.
//!
//! # Key Concepts
//!
//! - **Investment**: an append-only record of a customer paying an amount
//!   into a fund
//! - **Customer Fund Total**: the derived running total per customer and
//!   fund, recomputed in the same transaction as every investment
//! - **Fund Restriction**: the overridable rule limiting a customer to a
//!   single fund
//! - **Investment Port**: the storage contract, implemented by the
//!   PostgreSQL adapter in `infra_db` and by an in-memory mock
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_investment::{InvestmentService, CreateInvestmentRequest};
//!
//! let service = InvestmentService::new(port);
//! let investment = service
//!     .create_investment(CreateInvestmentRequest::new(customer_id, fund_id, dec!(100)), None)
//!     .await?;
//! ```

pub mod customer;
pub mod error;
pub mod fund;
pub mod investment;
pub mod ports;
pub mod rules;
pub mod service;
pub mod total;

pub use customer::{NewRetailCustomer, RetailCustomer};
pub use error::{ErrorKind, InvestmentError, StorageStage};
pub use fund::Fund;
pub use investment::{CreateInvestmentRequest, Investment, InvestmentStatus, NewInvestment};
pub use ports::InvestmentPort;
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockInvestmentPort;
pub use rules::FundRestriction;
pub use service::InvestmentService;
pub use total::CustomerFundTotal;

use rust_decimal::Decimal;

/// Currency precision used for investment amounts
pub const AMOUNT_SCALE: u32 = 2;

/// Rounds an amount to currency precision
///
/// # Example
///
/// ```rust
/// use domain_investment::round_amount;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(round_amount(dec!(10.005)), dec!(10.00));
/// ```
pub fn round_amount(value: Decimal) -> Decimal {
    value.round_dp(AMOUNT_SCALE)
}
