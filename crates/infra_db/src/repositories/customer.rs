//! Retail customer repository implementation

use sqlx::PgPool;
use uuid::Uuid;
use tracing::debug;

use core_kernel::CustomerId;
use domain_investment::{NewRetailCustomer, RetailCustomer};

use crate::error::DatabaseError;

/// Repository for retail customer records
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a customer, assigning a new id
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::DuplicateEntry` if the email is already taken
    pub async fn create(&self, customer: &NewRetailCustomer) -> Result<CustomerRow, DatabaseError> {
        let id = CustomerId::new_v7();
        debug!(customer_id = %id, "Creating retail customer");

        sqlx::query_as::<_, CustomerRow>(
            r#"
            INSERT INTO retail_customers (id, first_name, last_name, email)
            VALUES ($1, $2, $3, $4)
            RETURNING id, first_name, last_name, email
            "#,
        )
        .bind(id.as_uuid())
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match DatabaseError::from(e) {
            DatabaseError::DuplicateEntry(_) => {
                DatabaseError::duplicate("RetailCustomer", "email", &customer.email)
            }
            other => other,
        })
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<CustomerRow, DatabaseError> {
        sqlx::query_as::<_, CustomerRow>(
            "SELECT id, first_name, last_name, email FROM retail_customers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("RetailCustomer", id))
    }

    pub async fn get_by_email(&self, email: &str) -> Result<CustomerRow, DatabaseError> {
        sqlx::query_as::<_, CustomerRow>(
            "SELECT id, first_name, last_name, email FROM retail_customers WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound(format!("RetailCustomer with email '{}' not found", email)))
    }
}

/// Database representation of a retail customer
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CustomerRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<CustomerRow> for RetailCustomer {
    fn from(row: CustomerRow) -> Self {
        RetailCustomer {
            id: CustomerId::from(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
        }
    }
}
