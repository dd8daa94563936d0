//! PostgreSQL Investment Adapter
//!
//! Implements `InvestmentPort` on top of [`InvestmentRepository`]. This is
//! the transactional boundary of the write path:
//!
//! 1. pre-check the customer's existing fund on the pool (`check`)
//! 2. apply the configured [`FundRestriction`]; a violation returns before
//!    any transaction is opened
//! 3. open the transaction (`begin`), take the per-customer advisory lock
//!    and repeat the check on the transaction's connection
//! 4. insert the row (`insert`)
//! 5. recompute the customer fund total (`refresh`)
//! 6. commit (`commit`)
//!
//! Every step runs under one deadline taken from the caller's
//! [`OperationMetadata`] or the adapter's `operation_timeout`. Returning
//! early from any step drops the open transaction, which rolls it back.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::adapters::{AdapterSettings, PostgresInvestmentAdapter};
//! use domain_investment::{InvestmentPort, InvestmentService};
//! use std::sync::Arc;
//!
//! let adapter = PostgresInvestmentAdapter::new(pool, AdapterSettings::default());
//! let service = InvestmentService::new(Arc::new(adapter));
//! ```

use std::future::Future;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::Deserialize;
use sqlx::PgPool;
use tracing::{debug, instrument, warn};

use core_kernel::{
    CustomerId, DomainPort, FundId, HealthCheckResult, HealthCheckable, InvestmentId,
    OperationMetadata, PageRequest,
};
use domain_investment::{
    CustomerFundTotal, FundRestriction, Investment, InvestmentError, InvestmentPort,
    InvestmentStatus, NewInvestment, StorageStage,
};

use crate::error::DatabaseError;
use crate::repositories::investment::{
    CustomerFundTotalRow, InvestmentRepository, InvestmentRow, InvestmentStatus as DbInvestmentStatus,
    NewInvestmentRow,
};

const ADAPTER_ID: &str = "postgres-investment-adapter";

/// How customer fund totals are recomputed after an insert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateRefresh {
    /// Recompute only the customer and fund that changed
    #[default]
    Affected,
    /// Rebuild every total
    Full,
}

/// Tunables for [`PostgresInvestmentAdapter`]
#[derive(Debug, Clone)]
pub struct AdapterSettings {
    pub restriction: FundRestriction,
    pub refresh: AggregateRefresh,
    /// Applied when the caller supplies no deadline
    pub operation_timeout: Duration,
}

impl Default for AdapterSettings {
    fn default() -> Self {
        Self {
            restriction: FundRestriction::SingleFund,
            refresh: AggregateRefresh::Affected,
            operation_timeout: Duration::from_secs(5),
        }
    }
}

impl AdapterSettings {
    pub fn with_restriction(mut self, restriction: FundRestriction) -> Self {
        self.restriction = restriction;
        self
    }

    pub fn with_refresh(mut self, refresh: AggregateRefresh) -> Self {
        self.refresh = refresh;
        self
    }

    pub fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = timeout;
        self
    }
}

/// PostgreSQL-backed implementation of the InvestmentPort trait
#[derive(Debug, Clone)]
pub struct PostgresInvestmentAdapter {
    repository: InvestmentRepository,
    pool: PgPool,
    settings: AdapterSettings,
}

impl PostgresInvestmentAdapter {
    pub fn new(pool: PgPool, settings: AdapterSettings) -> Self {
        Self {
            repository: InvestmentRepository::new(pool.clone()),
            pool,
            settings,
        }
    }

    fn deadline(&self, metadata: Option<&OperationMetadata>) -> Instant {
        match metadata {
            Some(m) => m.deadline_or(self.settings.operation_timeout),
            None => Instant::now() + self.settings.operation_timeout,
        }
    }

    async fn refresh(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        customer_id: uuid::Uuid,
        fund_id: uuid::Uuid,
    ) -> Result<(), DatabaseError> {
        let written = match self.settings.refresh {
            AggregateRefresh::Affected => {
                self.repository.refresh_total(tx, customer_id, fund_id).await?
            }
            AggregateRefresh::Full => self.repository.refresh_all_totals(tx).await?,
        };

        if written == 0 {
            return Err(DatabaseError::QueryFailed(format!(
                "no customer fund total written for {}/{}",
                customer_id, fund_id
            )));
        }
        Ok(())
    }
}

impl DomainPort for PostgresInvestmentAdapter {}

#[async_trait]
impl HealthCheckable for PostgresInvestmentAdapter {
    /// Runs `SELECT 1` against the pool and reports the latency
    async fn health_check(&self) -> HealthCheckResult {
        let start = Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(_) => HealthCheckResult::healthy(ADAPTER_ID, latency_ms),
            Err(e) => {
                HealthCheckResult::unhealthy(ADAPTER_ID, latency_ms, format!("Database error: {}", e))
            }
        }
    }
}

#[async_trait]
impl InvestmentPort for PostgresInvestmentAdapter {
    #[instrument(
        skip(self, investment, metadata),
        fields(
            investment_id = %investment.id,
            customer_id = %investment.customer_id,
            fund_id = %investment.fund_id
        )
    )]
    async fn create_investment(
        &self,
        investment: NewInvestment,
        metadata: Option<OperationMetadata>,
    ) -> Result<Investment, InvestmentError> {
        let deadline = self.deadline(metadata.as_ref());
        let restriction = self.settings.restriction;
        let customer_id = *investment.customer_id.as_uuid();
        let fund_id = *investment.fund_id.as_uuid();

        if restriction.needs_existing_fund() {
            let existing = staged(
                deadline,
                StorageStage::Check,
                self.repository.find_existing_fund(&self.pool, customer_id),
            )
            .await?;
            restriction.check(investment.customer_id, existing.map(FundId::from), investment.fund_id)?;
        }

        let mut tx = staged(deadline, StorageStage::Begin, async {
            self.pool.begin().await.map_err(DatabaseError::from)
        })
        .await?;

        if restriction.needs_existing_fund() {
            staged(
                deadline,
                StorageStage::Check,
                self.repository.lock_customer(&mut tx, customer_id),
            )
            .await?;
            let existing = staged(
                deadline,
                StorageStage::Check,
                self.repository.find_existing_fund(&mut *tx, customer_id),
            )
            .await?;
            if let Err(e) =
                restriction.check(investment.customer_id, existing.map(FundId::from), investment.fund_id)
            {
                debug!("Fund restriction failed on re-check, rolling back");
                return Err(e);
            }
        }

        let new_row = NewInvestmentRow {
            id: *investment.id.as_uuid(),
            customer_id,
            fund_id,
            amount: investment.amount,
            status: status_to_db(investment.status),
        };
        let row = staged(
            deadline,
            StorageStage::Insert,
            self.repository.insert(&mut tx, &new_row),
        )
        .await?;

        staged(
            deadline,
            StorageStage::Refresh,
            self.refresh(&mut tx, customer_id, fund_id),
        )
        .await?;

        staged(deadline, StorageStage::Commit, async move {
            tx.commit().await.map_err(DatabaseError::from)
        })
        .await?;

        debug!("Investment committed");
        Ok(row_to_investment(row))
    }

    #[instrument(skip(self, metadata), fields(customer_id = %customer_id))]
    async fn list_investments_by_customer(
        &self,
        customer_id: CustomerId,
        page: PageRequest,
        metadata: Option<OperationMetadata>,
    ) -> Result<(Vec<Investment>, u64), InvestmentError> {
        let deadline = self.deadline(metadata.as_ref());
        let id = *customer_id.as_uuid();

        let (rows, total) = staged(deadline, StorageStage::Query, async {
            let mut tx = self.repository.begin_read_snapshot().await?;
            let rows = self
                .repository
                .list_by_customer(&mut *tx, id, page.limit(), page.offset())
                .await?;
            let total = self.repository.count_by_customer(&mut *tx, id).await?;
            tx.commit().await.map_err(DatabaseError::from)?;
            Ok::<_, DatabaseError>((rows, total))
        })
        .await?;

        let investments = rows.into_iter().map(row_to_investment).collect();
        Ok((investments, u64::try_from(total).unwrap_or_default()))
    }

    #[instrument(skip(self, metadata), fields(investment_id = %id))]
    async fn get_investment(
        &self,
        id: InvestmentId,
        metadata: Option<OperationMetadata>,
    ) -> Result<Investment, InvestmentError> {
        let deadline = self.deadline(metadata.as_ref());

        staged(
            deadline,
            StorageStage::Query,
            self.repository.get_by_id(*id.as_uuid()),
        )
        .await
        .map(row_to_investment)
    }

    #[instrument(skip(self, metadata), fields(customer_id = %customer_id, fund_id = %fund_id))]
    async fn get_customer_fund_total(
        &self,
        customer_id: CustomerId,
        fund_id: FundId,
        metadata: Option<OperationMetadata>,
    ) -> Result<CustomerFundTotal, InvestmentError> {
        let deadline = self.deadline(metadata.as_ref());

        staged(
            deadline,
            StorageStage::Query,
            self.repository.get_total(*customer_id.as_uuid(), *fund_id.as_uuid()),
        )
        .await
        .map(row_to_total)
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Runs one step of an operation under the shared deadline
async fn staged<T, F>(deadline: Instant, stage: StorageStage, step: F) -> Result<T, InvestmentError>
where
    F: Future<Output = Result<T, DatabaseError>>,
{
    match tokio::time::timeout_at(tokio::time::Instant::from_std(deadline), step).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(db_to_investment_error(stage, e)),
        Err(_) => {
            warn!(stage = %stage, "Operation deadline exceeded");
            Err(InvestmentError::timeout(stage))
        }
    }
}

/// Converts a database error into the domain error for `stage`
fn db_to_investment_error(stage: StorageStage, e: DatabaseError) -> InvestmentError {
    match e {
        DatabaseError::NotFound(message) => InvestmentError::NotFound {
            entity: "Record".to_string(),
            id: message,
        },
        DatabaseError::ForeignKeyViolation(_) if stage == StorageStage::Insert => {
            InvestmentError::not_found("Customer or fund", "referenced by investment")
        }
        other => InvestmentError::storage(stage, other.to_string()),
    }
}

fn status_to_db(status: InvestmentStatus) -> DbInvestmentStatus {
    match status {
        InvestmentStatus::Pending => DbInvestmentStatus::Pending,
        InvestmentStatus::Settled => DbInvestmentStatus::Settled,
        InvestmentStatus::Rejected => DbInvestmentStatus::Rejected,
    }
}

fn status_from_db(status: DbInvestmentStatus) -> InvestmentStatus {
    match status {
        DbInvestmentStatus::Pending => InvestmentStatus::Pending,
        DbInvestmentStatus::Settled => InvestmentStatus::Settled,
        DbInvestmentStatus::Rejected => InvestmentStatus::Rejected,
    }
}

fn row_to_investment(row: InvestmentRow) -> Investment {
    Investment {
        id: InvestmentId::from(row.id),
        customer_id: CustomerId::from(row.customer_id),
        fund_id: FundId::from(row.fund_id),
        amount: row.amount,
        created_at: row.created_at,
        status: status_from_db(row.status),
    }
}

fn row_to_total(row: CustomerFundTotalRow) -> CustomerFundTotal {
    CustomerFundTotal {
        customer_id: CustomerId::from(row.customer_id),
        first_name: row.first_name,
        last_name: row.last_name,
        email: row.email,
        fund_id: FundId::from(row.fund_id),
        fund_name: row.fund_name,
        total_investment: row.total_investment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_keeps_not_found() {
        let error = db_to_investment_error(
            StorageStage::Query,
            DatabaseError::not_found("Investment", "abc"),
        );
        assert!(error.is_not_found());
    }

    #[test]
    fn test_failures_carry_stage() {
        let error = db_to_investment_error(
            StorageStage::Refresh,
            DatabaseError::QueryFailed("boom".to_string()),
        );
        assert_eq!(error.stage(), Some(StorageStage::Refresh));
        assert!(!error.is_timeout());
    }

    #[test]
    fn test_unknown_reference_on_insert_is_not_found() {
        let error = db_to_investment_error(
            StorageStage::Insert,
            DatabaseError::ForeignKeyViolation("fk".to_string()),
        );
        assert!(error.is_not_found());
    }

    #[tokio::test]
    async fn test_staged_times_out() {
        let deadline = Instant::now() + Duration::from_millis(10);
        let result = staged(deadline, StorageStage::Insert, async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<(), DatabaseError>(())
        })
        .await;

        let error = result.unwrap_err();
        assert!(error.is_timeout());
        assert_eq!(error.stage(), Some(StorageStage::Insert));
    }

    #[test]
    fn test_status_mapping_round_trips() {
        for status in [InvestmentStatus::Pending, InvestmentStatus::Settled, InvestmentStatus::Rejected] {
            assert_eq!(status_from_db(status_to_db(status)), status);
        }
    }

    #[test]
    fn test_settings_defaults() {
        let settings = AdapterSettings::default();
        assert_eq!(settings.restriction, FundRestriction::SingleFund);
        assert_eq!(settings.refresh, AggregateRefresh::Affected);
        assert_eq!(settings.operation_timeout, Duration::from_secs(5));
    }
}
