//! Core Kernel - Foundational types for the ISA investment service
//!
//! This crate provides the building blocks used across the domain and
//! infrastructure crates:
//! - Strongly-typed identifiers for customers, funds, and investments
//! - The pagination contract shared by every list operation
//! - Port plumbing (health checks, operation metadata and deadlines)

pub mod identifiers;
pub mod pagination;
pub mod ports;

pub use identifiers::{CustomerId, FundId, InvestmentId};
pub use pagination::{
    PageRequest, Paginated, PaginationMeta, DEFAULT_PAGE, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
pub use ports::{
    AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, OperationMetadata,
};
