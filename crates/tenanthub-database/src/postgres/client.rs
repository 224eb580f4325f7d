//! PostgreSQL client store.

use async_trait::async_trait;
use sqlx::PgPool;

use tenanthub_core::error::{AppError, ErrorKind};
use tenanthub_core::result::AppResult;
use tenanthub_core::types::{ClientId, CompanyId};
use tenanthub_entity::client::{Client, CreateClient};

use crate::store::ClientStore;

use super::map_insert_err;

const SELECT_LIVE: &str = "SELECT id, company_id, name, account_number, mobile_number, \
     landline_number, email, description, system_details, is_deleted, created_at, updated_at \
     FROM clients WHERE is_deleted = FALSE";

/// PostgreSQL-backed [`ClientStore`].
#[derive(Debug, Clone)]
pub struct PgClientStore {
    pool: PgPool,
}

impl PgClientStore {
    /// Create a new client store over the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientStore for PgClientStore {
    async fn find_by_id(&self, id: ClientId) -> AppResult<Option<Client>> {
        sqlx::query_as::<_, Client>(&format!("{SELECT_LIVE} AND id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find client", e))
    }

    async fn insert(&self, company_id: CompanyId, create: &CreateClient) -> AppResult<Client> {
        let client = Client::new(company_id, create);

        sqlx::query(
            "INSERT INTO clients \
             (id, company_id, name, account_number, mobile_number, landline_number, \
              email, description, system_details, is_deleted, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
        )
        .bind(client.id)
        .bind(client.company_id)
        .bind(&client.name)
        .bind(&client.contact.account_number)
        .bind(&client.contact.mobile_number)
        .bind(&client.contact.landline_number)
        .bind(&client.contact.email)
        .bind(&client.contact.description)
        .bind(&client.contact.system_details)
        .bind(client.is_deleted)
        .bind(client.created_at)
        .bind(client.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_err(e, "Client already exists.", "client"))?;

        Ok(client)
    }

    async fn list_by_company(&self, company_id: CompanyId) -> AppResult<Vec<Client>> {
        sqlx::query_as::<_, Client>(&format!(
            "{SELECT_LIVE} AND company_id = $1 ORDER BY created_at"
        ))
        .bind(company_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list clients", e))
    }

    async fn list_all(&self) -> AppResult<Vec<Client>> {
        sqlx::query_as::<_, Client>(&format!("{SELECT_LIVE} ORDER BY created_at"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list clients", e))
    }

    async fn soft_delete(&self, id: ClientId) -> AppResult<bool> {
        // The client and its customers are flagged together.
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let result = sqlx::query(
            "UPDATE clients SET is_deleted = TRUE, updated_at = NOW() \
             WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to soft-delete client", e)
        })?;

        sqlx::query(
            "UPDATE customers SET is_deleted = TRUE, updated_at = NOW() \
             WHERE client_id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to soft-delete customers", e)
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok(result.rows_affected() > 0)
    }
}
