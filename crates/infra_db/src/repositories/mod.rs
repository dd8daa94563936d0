//! Repository implementations
//!
//! Repositories encapsulate SQL and map between database rows and domain
//! types. They return [`DatabaseError`](crate::DatabaseError) and leave
//! transaction sequencing to the adapters.

pub mod customer;
pub mod fund;
pub mod investment;

pub use customer::{CustomerRepository, CustomerRow};
pub use fund::{FundRepository, FundRow};
pub use investment::{CustomerFundTotalRow, InvestmentRepository, InvestmentRow, NewInvestmentRow};
