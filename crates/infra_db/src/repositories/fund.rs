//! Fund repository implementation
//!
//! Read access to the fund catalogue, plus an insert used for seeding.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::FundId;
use domain_investment::Fund;

use crate::error::DatabaseError;

/// Repository for the fund catalogue
#[derive(Debug, Clone)]
pub struct FundRepository {
    pool: PgPool,
}

impl FundRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lists funds ordered by name
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<FundRow>, DatabaseError> {
        let funds = sqlx::query_as::<_, FundRow>(
            r#"
            SELECT id, name, description, min_investment, is_active
            FROM funds
            ORDER BY name ASC, id ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(funds)
    }

    /// Counts every fund in the catalogue
    pub async fn count(&self) -> Result<i64, DatabaseError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM funds")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<FundRow, DatabaseError> {
        sqlx::query_as::<_, FundRow>(
            r#"
            SELECT id, name, description, min_investment, is_active
            FROM funds
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Fund", id))
    }

    pub async fn insert(&self, fund: &Fund) -> Result<FundRow, DatabaseError> {
        let row = sqlx::query_as::<_, FundRow>(
            r#"
            INSERT INTO funds (id, name, description, min_investment, is_active)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, description, min_investment, is_active
            "#,
        )
        .bind(fund.id.as_uuid())
        .bind(&fund.name)
        .bind(&fund.description)
        .bind(fund.min_investment)
        .bind(fund.is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }
}

/// Database representation of a fund
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FundRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub min_investment: Decimal,
    pub is_active: bool,
}

impl From<FundRow> for Fund {
    fn from(row: FundRow) -> Self {
        Fund {
            id: FundId::from(row.id),
            name: row.name,
            description: row.description,
            min_investment: row.min_investment,
            is_active: row.is_active,
        }
    }
}
