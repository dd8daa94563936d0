//! Investment domain errors

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use core_kernel::{CustomerId, FundId};

/// Step of an operation at which a storage failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageStage {
    /// Reading the fund a customer already invests in
    Check,
    /// Opening the write transaction
    Begin,
    /// Inserting the investment row
    Insert,
    /// Recomputing the customer fund totals
    Refresh,
    /// Committing the write transaction
    Commit,
    /// Any read-path query
    Query,
}

impl StorageStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageStage::Check => "check",
            StorageStage::Begin => "begin",
            StorageStage::Insert => "insert",
            StorageStage::Refresh => "refresh",
            StorageStage::Commit => "commit",
            StorageStage::Query => "query",
        }
    }
}

impl fmt::Display for StorageStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse classification callers use to pick a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    InvariantViolation,
    NotFound,
    StorageFailure,
}

/// Errors that can occur in the investment domain
#[derive(Debug, Error)]
pub enum InvestmentError {
    /// Malformed input, rejected before any store access
    #[error("Validation error on '{field}': {message}")]
    Validation { field: String, message: String },

    /// The customer already holds investments in another fund
    #[error(
        "Customer {customer_id} already invests in fund {existing_fund_id}; \
         investing in fund {requested_fund_id} is not allowed"
    )]
    DifferentFundNotAllowed {
        customer_id: CustomerId,
        existing_fund_id: FundId,
        requested_fund_id: FundId,
    },

    #[error("Not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    /// Any I/O or transaction failure, tagged with the failing stage
    #[error("Storage failure during {stage}: {message}")]
    Storage {
        stage: StorageStage,
        message: String,
        timed_out: bool,
    },
}

impl InvestmentError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        InvestmentError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn not_found(entity: impl Into<String>, id: impl fmt::Display) -> Self {
        InvestmentError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    pub fn storage(stage: StorageStage, message: impl Into<String>) -> Self {
        InvestmentError::Storage {
            stage,
            message: message.into(),
            timed_out: false,
        }
    }

    /// A storage failure caused by the operation deadline expiring
    pub fn timeout(stage: StorageStage) -> Self {
        InvestmentError::Storage {
            stage,
            message: "operation deadline exceeded".to_string(),
            timed_out: true,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            InvestmentError::Validation { .. } => ErrorKind::Validation,
            InvestmentError::DifferentFundNotAllowed { .. } => ErrorKind::InvariantViolation,
            InvestmentError::NotFound { .. } => ErrorKind::NotFound,
            InvestmentError::Storage { .. } => ErrorKind::StorageFailure,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_invariant_violation(&self) -> bool {
        self.kind() == ErrorKind::InvariantViolation
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, InvestmentError::Storage { timed_out: true, .. })
    }

    /// Prefixes `context` onto the message of a storage failure
    ///
    /// Stage, timeout flag and variant are kept. The other variants already
    /// name the entities involved and are returned as they are.
    pub fn with_context(self, context: impl fmt::Display) -> Self {
        match self {
            InvestmentError::Storage {
                stage,
                message,
                timed_out,
            } => InvestmentError::Storage {
                stage,
                message: format!("{context}: {message}"),
                timed_out,
            },
            other => other,
        }
    }

    /// The failing stage, for storage failures
    pub fn stage(&self) -> Option<StorageStage> {
        match self {
            InvestmentError::Storage { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(
            InvestmentError::validation("amount", "must be positive").kind(),
            ErrorKind::Validation
        );
        assert!(InvestmentError::not_found("Investment", "x").is_not_found());
        assert_eq!(
            InvestmentError::storage(StorageStage::Insert, "boom").stage(),
            Some(StorageStage::Insert)
        );
    }

    #[test]
    fn test_context_keeps_classification() {
        let error = InvestmentError::timeout(StorageStage::Commit).with_context("making investment");
        assert!(error.is_timeout());
        assert_eq!(error.stage(), Some(StorageStage::Commit));
        assert!(error.to_string().contains("making investment: operation deadline exceeded"));

        let error = InvestmentError::not_found("Investment", "x").with_context("ignored");
        assert!(!error.to_string().contains("ignored"));
    }

    #[test]
    fn test_timeout_flag() {
        let error = InvestmentError::timeout(StorageStage::Refresh);
        assert!(error.is_timeout());
        assert!(error.to_string().contains("refresh"));
    }
}
