//! PostgreSQL customer store.

use async_trait::async_trait;
use sqlx::PgPool;

use tenanthub_core::error::{AppError, ErrorKind};
use tenanthub_core::result::AppResult;
use tenanthub_core::types::{ClientId, CompanyId, CustomerId};
use tenanthub_entity::customer::{CreateCustomer, Customer};

use crate::store::CustomerStore;

use super::map_insert_err;

const SELECT_LIVE: &str = "SELECT c.id, c.client_id, c.name, c.account_number, c.mobile_number, \
     c.landline_number, c.email, c.description, c.system_details, c.is_deleted, \
     c.created_at, c.updated_at FROM customers c WHERE c.is_deleted = FALSE";

/// PostgreSQL-backed [`CustomerStore`].
#[derive(Debug, Clone)]
pub struct PgCustomerStore {
    pool: PgPool,
}

impl PgCustomerStore {
    /// Create a new customer store over the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerStore for PgCustomerStore {
    async fn find_by_id(&self, id: CustomerId) -> AppResult<Option<Customer>> {
        sqlx::query_as::<_, Customer>(&format!("{SELECT_LIVE} AND c.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find customer", e))
    }

    async fn insert(&self, create: &CreateCustomer) -> AppResult<Customer> {
        let customer = Customer::new(create);

        sqlx::query(
            "INSERT INTO customers \
             (id, client_id, name, account_number, mobile_number, landline_number, \
              email, description, system_details, is_deleted, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
        )
        .bind(customer.id)
        .bind(customer.client_id)
        .bind(&customer.name)
        .bind(&customer.contact.account_number)
        .bind(&customer.contact.mobile_number)
        .bind(&customer.contact.landline_number)
        .bind(&customer.contact.email)
        .bind(&customer.contact.description)
        .bind(&customer.contact.system_details)
        .bind(customer.is_deleted)
        .bind(customer.created_at)
        .bind(customer.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_err(e, "Customer already exists.", "customer"))?;

        Ok(customer)
    }

    async fn list_by_client(&self, client_id: ClientId) -> AppResult<Vec<Customer>> {
        sqlx::query_as::<_, Customer>(&format!(
            "{SELECT_LIVE} AND c.client_id = $1 ORDER BY c.created_at"
        ))
        .bind(client_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list customers", e))
    }

    async fn list_by_company(&self, company_id: CompanyId) -> AppResult<Vec<Customer>> {
        sqlx::query_as::<_, Customer>(&format!(
            "{SELECT_LIVE} AND c.client_id IN \
             (SELECT id FROM clients WHERE company_id = $1 AND is_deleted = FALSE) \
             ORDER BY c.created_at"
        ))
        .bind(company_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list customers", e))
    }

    async fn soft_delete(&self, id: CustomerId) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE customers SET is_deleted = TRUE, updated_at = NOW() \
             WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to soft-delete customer", e)
        })?;

        Ok(result.rows_affected() > 0)
    }
}
