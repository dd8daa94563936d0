//! Ports and Adapters Infrastructure
//!
//! Domain crates define port traits that extend the marker traits here;
//! infrastructure crates provide the adapters.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │     Application Services     │
//! └──────────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────┐
//! │  Port traits (InvestmentPort)│
//! └──────────────────────────────┘
//!        ▲                ▲
//!        │                │
//! ┌──────────────┐ ┌──────────────┐
//! │  PostgreSQL  │ │  In-memory   │
//! │   adapter    │ │  mock port   │
//! └──────────────┘ └──────────────┘
//! ```

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Marker trait for all domain ports
///
/// Ports are shared across request tasks, so they must be thread-safe.
pub trait DomainPort: Send + Sync + 'static {}

/// Health status for an adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterHealth {
    Healthy,
    Unhealthy,
}

/// Health check result for an adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    /// Adapter identifier
    pub adapter_id: String,
    /// Current health status
    pub status: AdapterHealth,
    /// Latency of the health check in milliseconds
    pub latency_ms: u64,
    /// Optional message with additional details
    pub message: Option<String>,
    /// Timestamp of the health check
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

impl HealthCheckResult {
    pub fn healthy(adapter_id: impl Into<String>, latency_ms: u64) -> Self {
        Self {
            adapter_id: adapter_id.into(),
            status: AdapterHealth::Healthy,
            latency_ms,
            message: None,
            checked_at: chrono::Utc::now(),
        }
    }

    pub fn unhealthy(adapter_id: impl Into<String>, latency_ms: u64, message: impl Into<String>) -> Self {
        Self {
            adapter_id: adapter_id.into(),
            status: AdapterHealth::Unhealthy,
            latency_ms,
            message: Some(message.into()),
            checked_at: chrono::Utc::now(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == AdapterHealth::Healthy
    }
}

/// Trait for adapters that support health checks
///
/// A failing check is reported, never fatal: callers decide what to do
/// with an unhealthy result.
#[async_trait::async_trait]
pub trait HealthCheckable: Send + Sync {
    async fn health_check(&self) -> HealthCheckResult;
}

/// Per-call metadata for tracing and cancellation
///
/// The optional `deadline` is the point in time after which the adapter must
/// abandon the operation. Adapters apply their own default when it is unset.
#[derive(Debug, Clone, Default)]
pub struct OperationMetadata {
    /// Correlation ID for tracing across systems
    pub correlation_id: Option<String>,
    /// Absolute deadline for the whole operation
    pub deadline: Option<Instant>,
    /// Additional context as key-value pairs
    pub context: HashMap<String, String>,
}

impl OperationMetadata {
    /// Creates new metadata with a correlation ID
    pub fn with_correlation_id(correlation_id: impl Into<String>) -> Self {
        Self {
            correlation_id: Some(correlation_id.into()),
            ..Default::default()
        }
    }

    /// Sets an absolute deadline
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets the deadline to `timeout` from now
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Adds context to the metadata
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// The caller's deadline, or `fallback` from now when none was given
    pub fn deadline_or(&self, fallback: Duration) -> Instant {
        self.deadline.unwrap_or_else(|| Instant::now() + fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_metadata() {
        let metadata = OperationMetadata::with_correlation_id("req-123")
            .with_context("customer_id", "c-456");

        assert_eq!(metadata.correlation_id, Some("req-123".to_string()));
        assert_eq!(metadata.context.get("customer_id"), Some(&"c-456".to_string()));
        assert!(metadata.deadline.is_none());
    }

    #[test]
    fn test_deadline_or_prefers_caller_deadline() {
        let deadline = Instant::now() + Duration::from_millis(10);
        let metadata = OperationMetadata::default().with_deadline(deadline);
        assert_eq!(metadata.deadline_or(Duration::from_secs(60)), deadline);
    }

    #[test]
    fn test_deadline_or_falls_back() {
        let before = Instant::now();
        let deadline = OperationMetadata::default().deadline_or(Duration::from_secs(5));
        assert!(deadline >= before + Duration::from_secs(5));
    }

    #[test]
    fn test_health_result_constructors() {
        assert!(HealthCheckResult::healthy("pg", 3).is_healthy());
        let down = HealthCheckResult::unhealthy("pg", 1000, "timeout");
        assert_eq!(down.status, AdapterHealth::Unhealthy);
        assert_eq!(down.message.as_deref(), Some("timeout"));
    }
}
