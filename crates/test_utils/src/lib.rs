//! Test Utilities Crate
//!
//! Shared test infrastructure for the ISA investment test suite.
//!
//! # Modules
//!
//! - `fixtures`: customers, funds and investment requests with realistic data
//! - `database`: PostgreSQL test containers with the schema applied
//! - `generators`: property-based test data generators
//!
//! This crate depends on the domain only, so `infra_db` can use it as a
//! dev-dependency.

pub mod database;
pub mod fixtures;
pub mod generators;

pub use database::*;
pub use fixtures::*;
pub use generators::*;
