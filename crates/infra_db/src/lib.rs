//! Infrastructure Database Layer
//!
//! PostgreSQL persistence for the ISA investment service, using SQLx.
//!
//! # Architecture
//!
//! - [`repositories`]: SQL primitives returning row types and
//!   [`DatabaseError`]
//! - [`adapters`]: implementations of domain ports that own transactions
//!   and translate errors
//! - [`pool`]: pool construction, migrations and the health monitor
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/isa")).await?;
//! run_migrations(&pool).await?;
//! ```

pub mod adapters;
pub mod error;
pub mod pool;
pub mod repositories;

pub use adapters::{AdapterSettings, AggregateRefresh, PostgresInvestmentAdapter};
pub use error::DatabaseError;
pub use pool::{
    create_pool, run_migrations, spawn_health_monitor, DatabaseConfig, DatabasePool,
    MIN_HEALTH_CHECK_INTERVAL,
};
pub use repositories::{CustomerRepository, FundRepository, InvestmentRepository};
