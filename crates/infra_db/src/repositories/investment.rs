//! Investment repository implementation
//!
//! SQL primitives for the investment write and read paths. Methods that
//! belong to the write transaction take the open transaction; sequencing,
//! the fund rule and error staging live in
//! [`PostgresInvestmentAdapter`](crate::adapters::PostgresInvestmentAdapter).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgExecutor, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::DatabaseError;

/// Repository for investments and the customer fund totals derived from them
#[derive(Debug, Clone)]
pub struct InvestmentRepository {
    pool: PgPool,
}

impl InvestmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns one fund the customer already holds committed investments in
    ///
    /// Runs on whatever executor is passed, so the same query serves the
    /// pre-check on the pool and the re-check inside the transaction.
    pub async fn find_existing_fund<'e, E>(
        &self,
        executor: E,
        customer_id: Uuid,
    ) -> Result<Option<Uuid>, DatabaseError>
    where
        E: PgExecutor<'e>,
    {
        let fund_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT DISTINCT fund_id
            FROM investments
            WHERE customer_id = $1
            LIMIT 1
            "#,
        )
        .bind(customer_id)
        .fetch_optional(executor)
        .await?;

        Ok(fund_id)
    }

    /// Takes the per-customer advisory lock, held until the transaction ends
    pub async fn lock_customer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer_id: Uuid,
    ) -> Result<(), DatabaseError> {
        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1::text, 0))")
            .bind(customer_id)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Inserts an investment row and returns it as stored
    pub async fn insert(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        investment: &NewInvestmentRow,
    ) -> Result<InvestmentRow, DatabaseError> {
        let row = sqlx::query_as::<_, InvestmentRow>(
            r#"
            INSERT INTO investments (id, customer_id, fund_id, amount, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, customer_id, fund_id, amount, created_at, status
            "#,
        )
        .bind(investment.id)
        .bind(investment.customer_id)
        .bind(investment.fund_id)
        .bind(investment.amount)
        .bind(investment.status)
        .fetch_one(&mut **tx)
        .await?;

        Ok(row)
    }

    /// Recomputes the total of one customer and fund from the investment rows
    ///
    /// Returns the number of aggregate rows written, which is zero only if
    /// the pair has no investments or the customer or fund row is missing.
    pub async fn refresh_total(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer_id: Uuid,
        fund_id: Uuid,
    ) -> Result<u64, DatabaseError> {
        let result = sqlx::query(
            r#"
            INSERT INTO customer_fund_totals (
                customer_id, fund_id, first_name, last_name, email,
                fund_name, total_investment, updated_at
            )
            SELECT
                i.customer_id, i.fund_id, c.first_name, c.last_name, c.email,
                f.name, SUM(i.amount), now()
            FROM investments i
            JOIN retail_customers c ON c.id = i.customer_id
            JOIN funds f ON f.id = i.fund_id
            WHERE i.customer_id = $1 AND i.fund_id = $2
            GROUP BY i.customer_id, i.fund_id, c.first_name, c.last_name, c.email, f.name
            ON CONFLICT (customer_id, fund_id) DO UPDATE SET
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                email = EXCLUDED.email,
                fund_name = EXCLUDED.fund_name,
                total_investment = EXCLUDED.total_investment,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(customer_id)
        .bind(fund_id)
        .execute(&mut **tx)
        .await?;

        Ok(result.rows_affected())
    }

    /// Rebuilds every customer fund total from the investment rows
    pub async fn refresh_all_totals(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<u64, DatabaseError> {
        sqlx::query("DELETE FROM customer_fund_totals")
            .execute(&mut **tx)
            .await?;

        let result = sqlx::query(
            r#"
            INSERT INTO customer_fund_totals (
                customer_id, fund_id, first_name, last_name, email,
                fund_name, total_investment, updated_at
            )
            SELECT
                i.customer_id, i.fund_id, c.first_name, c.last_name, c.email,
                f.name, SUM(i.amount), now()
            FROM investments i
            JOIN retail_customers c ON c.id = i.customer_id
            JOIN funds f ON f.id = i.fund_id
            GROUP BY i.customer_id, i.fund_id, c.first_name, c.last_name, c.email, f.name
            "#,
        )
        .execute(&mut **tx)
        .await?;

        Ok(result.rows_affected())
    }

    /// Opens a read-only repeatable-read transaction, so a page and its
    /// count see the same rows
    pub async fn begin_read_snapshot(&self) -> Result<Transaction<'static, Postgres>, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;
        Ok(tx)
    }

    /// Lists a customer's investments oldest first
    pub async fn list_by_customer<'e, E>(
        &self,
        executor: E,
        customer_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<InvestmentRow>, DatabaseError>
    where
        E: PgExecutor<'e>,
    {
        let rows = sqlx::query_as::<_, InvestmentRow>(
            r#"
            SELECT id, customer_id, fund_id, amount, created_at, status
            FROM investments
            WHERE customer_id = $1
            ORDER BY created_at ASC, id ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(customer_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(executor)
        .await?;

        Ok(rows)
    }

    pub async fn count_by_customer<'e, E>(
        &self,
        executor: E,
        customer_id: Uuid,
    ) -> Result<i64, DatabaseError>
    where
        E: PgExecutor<'e>,
    {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM investments WHERE customer_id = $1",
        )
        .bind(customer_id)
        .fetch_one(executor)
        .await?;

        Ok(count)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<InvestmentRow, DatabaseError> {
        sqlx::query_as::<_, InvestmentRow>(
            r#"
            SELECT id, customer_id, fund_id, amount, created_at, status
            FROM investments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Investment", id))
    }

    pub async fn get_total(
        &self,
        customer_id: Uuid,
        fund_id: Uuid,
    ) -> Result<CustomerFundTotalRow, DatabaseError> {
        sqlx::query_as::<_, CustomerFundTotalRow>(
            r#"
            SELECT
                customer_id, fund_id, first_name, last_name, email,
                fund_name, total_investment
            FROM customer_fund_totals
            WHERE customer_id = $1 AND fund_id = $2
            "#,
        )
        .bind(customer_id)
        .bind(fund_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            DatabaseError::not_found("CustomerFundTotal", format!("{}/{}", customer_id, fund_id))
        })
    }
}

// ============================================================================
// Row Types
// ============================================================================

/// Database representation of an investment
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct InvestmentRow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub fund_id: Uuid,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub status: InvestmentStatus,
}

/// Values for inserting an investment; `created_at` is assigned by the store
#[derive(Debug, Clone)]
pub struct NewInvestmentRow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub fund_id: Uuid,
    pub amount: Decimal,
    pub status: InvestmentStatus,
}

/// Database representation of a customer fund total
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CustomerFundTotalRow {
    pub customer_id: Uuid,
    pub fund_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub fund_name: String,
    pub total_investment: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "investment_status", rename_all = "snake_case")]
pub enum InvestmentStatus {
    Pending,
    Settled,
    Rejected,
}
