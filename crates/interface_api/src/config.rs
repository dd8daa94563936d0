//! API configuration
//!
//! Loaded from `API_`-prefixed environment variables; anything unset keeps
//! its compiled-in default.

use std::time::Duration;

use serde::Deserialize;

use domain_investment::FundRestriction;
use infra_db::{AdapterSettings, AggregateRefresh, DatabaseConfig};

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database URL
    pub database_url: String,
    /// Log level or `EnvFilter` directive
    pub log_level: String,
    /// `text` or `json`
    pub log_format: String,
    pub max_connections: u32,
    /// Deadline for one investment port operation
    pub operation_timeout_ms: u64,
    /// Deadline for a whole HTTP request
    pub request_timeout_secs: u64,
    /// Restrict each customer to a single fund
    pub single_fund_only: bool,
    pub aggregate_refresh: AggregateRefresh,
    /// Apply pending migrations at startup
    pub run_migrations: bool,
    pub health_check_interval_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: "postgres://localhost/isa".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            max_connections: 10,
            operation_timeout_ms: 5_000,
            request_timeout_secs: 60,
            single_fund_only: true,
            aggregate_refresh: AggregateRefresh::Affected,
            run_migrations: true,
            health_check_interval_secs: 30,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }

    pub fn operation_timeout(&self) -> Duration {
        Duration::from_millis(self.operation_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Health monitor period; zero is treated as one second
    pub fn health_check_interval(&self) -> Duration {
        Duration::from_secs(self.health_check_interval_secs.max(1))
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig::new(&self.database_url).max_connections(self.max_connections)
    }

    pub fn adapter_settings(&self) -> AdapterSettings {
        AdapterSettings::default()
            .with_restriction(FundRestriction::from_single_fund_flag(self.single_fund_only))
            .with_refresh(self.aggregate_refresh)
            .with_operation_timeout(self.operation_timeout())
    }
}
