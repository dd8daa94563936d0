//! Domain Adapters
//!
//! PostgreSQL implementations of domain ports. Each adapter implements the
//! port trait, converts between row and domain types, and translates
//! `DatabaseError` into the domain's error type.

pub mod investment;

pub use investment::{AdapterSettings, AggregateRefresh, PostgresInvestmentAdapter};
