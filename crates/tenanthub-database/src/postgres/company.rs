//! PostgreSQL company store.

use async_trait::async_trait;
use sqlx::PgPool;

use tenanthub_core::error::{AppError, ErrorKind};
use tenanthub_core::result::AppResult;
use tenanthub_core::types::CompanyId;
use tenanthub_entity::company::{Company, CreateCompany};
use tenanthub_entity::principal::{CreatePrincipal, Principal};

use crate::store::CompanyStore;

use super::map_insert_err;
use super::principal::bind_insert;

const INSERT_COMPANY: &str = "INSERT INTO companies \
     (id, name, is_active, is_deleted, created_at, updated_at) \
     VALUES ($1, $2, $3, $4, $5, $6)";

/// PostgreSQL-backed [`CompanyStore`].
#[derive(Debug, Clone)]
pub struct PgCompanyStore {
    pool: PgPool,
}

impl PgCompanyStore {
    /// Create a new company store over the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CompanyStore for PgCompanyStore {
    async fn find_by_id(&self, id: CompanyId) -> AppResult<Option<Company>> {
        sqlx::query_as::<_, Company>(
            "SELECT id, name, is_active, is_deleted, created_at, updated_at \
             FROM companies WHERE is_deleted = FALSE AND id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find company", e))
    }

    async fn insert(&self, create: &CreateCompany) -> AppResult<Company> {
        let company = Company::new(&create.name);

        sqlx::query(INSERT_COMPANY)
            .bind(company.id)
            .bind(&company.name)
            .bind(company.is_active)
            .bind(company.is_deleted)
            .bind(company.created_at)
            .bind(company.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_insert_err(e, "Company already exists.", "company"))?;

        Ok(company)
    }

    async fn insert_with_super_user(
        &self,
        create: &CreateCompany,
        super_user: &CreatePrincipal,
    ) -> AppResult<(Company, Principal)> {
        let company = Company::new(&create.name);
        let mut create = super_user.clone();
        create.company_id = Some(company.id);
        let principal = create.materialize();

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        sqlx::query(INSERT_COMPANY)
            .bind(company.id)
            .bind(&company.name)
            .bind(company.is_active)
            .bind(company.is_deleted)
            .bind(company.created_at)
            .bind(company.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_insert_err(e, "Company already exists.", "company"))?;

        bind_insert(&principal)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_insert_err(e, "User already exists.", "principal"))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok((company, principal))
    }

    async fn soft_delete(&self, id: CompanyId) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE companies SET is_deleted = TRUE, updated_at = NOW() \
             WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to soft-delete company", e)
        })?;

        Ok(result.rows_affected() > 0)
    }
}
