//! PostgreSQL principal store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use tenanthub_core::error::{AppError, ErrorKind};
use tenanthub_core::result::AppResult;
use tenanthub_core::types::{CompanyId, PrincipalId};
use tenanthub_entity::principal::{AccountRole, CreatePrincipal, Principal};

use crate::store::PrincipalStore;

use super::map_insert_err;

/// Raw `principals` row. Roles are stored as a `TEXT[]` of slugs so that a
/// principal and its role assignment are a single atomic write.
#[derive(Debug, FromRow)]
struct PrincipalRow {
    id: PrincipalId,
    username: String,
    email: String,
    password_hash: String,
    roles: Vec<String>,
    is_superuser: bool,
    company_id: Option<CompanyId>,
    is_active: bool,
    is_deleted: bool,
    created_by: Option<PrincipalId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    last_login_at: Option<DateTime<Utc>>,
}

impl TryFrom<PrincipalRow> for Principal {
    type Error = AppError;

    fn try_from(row: PrincipalRow) -> Result<Self, Self::Error> {
        let roles = row
            .roles
            .iter()
            .map(|slug| slug.parse::<AccountRole>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| {
                AppError::database(format!(
                    "Principal '{}' carries an unknown role slug",
                    row.username
                ))
            })?;

        Ok(Principal {
            id: row.id,
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
            roles,
            is_superuser: row.is_superuser,
            company_id: row.company_id,
            is_active: row.is_active,
            is_deleted: row.is_deleted,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
            last_login_at: row.last_login_at,
        })
    }
}

const SELECT_LIVE: &str = "SELECT id, username, email, password_hash, roles, is_superuser, \
     company_id, is_active, is_deleted, created_by, created_at, updated_at, last_login_at \
     FROM principals WHERE is_deleted = FALSE";

pub(crate) const INSERT_PRINCIPAL: &str = "INSERT INTO principals \
     (id, username, email, password_hash, roles, is_superuser, company_id, \
      is_active, is_deleted, created_by, created_at, updated_at, last_login_at) \
     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)";

/// Bind a materialized principal onto the insert statement.
pub(crate) fn bind_insert(
    principal: &Principal,
) -> sqlx::query::Query<'_, sqlx::Postgres, sqlx::postgres::PgArguments> {
    let role_slugs: Vec<String> = principal
        .roles
        .iter()
        .map(|r| r.as_str().to_string())
        .collect();

    sqlx::query(INSERT_PRINCIPAL)
        .bind(principal.id)
        .bind(&principal.username)
        .bind(&principal.email)
        .bind(&principal.password_hash)
        .bind(role_slugs)
        .bind(principal.is_superuser)
        .bind(principal.company_id)
        .bind(principal.is_active)
        .bind(principal.is_deleted)
        .bind(principal.created_by)
        .bind(principal.created_at)
        .bind(principal.updated_at)
        .bind(principal.last_login_at)
}

/// PostgreSQL-backed [`PrincipalStore`].
#[derive(Debug, Clone)]
pub struct PgPrincipalStore {
    pool: PgPool,
}

impl PgPrincipalStore {
    /// Create a new principal store over the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_optional(&self, sql: String, bind: &str) -> AppResult<Option<Principal>> {
        sqlx::query_as::<_, PrincipalRow>(&sql)
            .bind(bind)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to query principal", e)
            })?
            .map(Principal::try_from)
            .transpose()
    }
}

#[async_trait]
impl PrincipalStore for PgPrincipalStore {
    async fn find_by_id(&self, id: PrincipalId) -> AppResult<Option<Principal>> {
        sqlx::query_as::<_, PrincipalRow>(&format!("{SELECT_LIVE} AND id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find principal by id", e)
            })?
            .map(Principal::try_from)
            .transpose()
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Principal>> {
        self.fetch_optional(
            format!("{SELECT_LIVE} AND LOWER(username) = LOWER($1)"),
            username,
        )
        .await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Principal>> {
        self.fetch_optional(format!("{SELECT_LIVE} AND LOWER(email) = LOWER($1)"), email)
            .await
    }

    async fn insert(&self, create: &CreatePrincipal) -> AppResult<Principal> {
        let principal = create.materialize();

        bind_insert(&principal)
            .execute(&self.pool)
            .await
            .map_err(|e| map_insert_err(e, "User already exists.", "principal"))?;

        Ok(principal)
    }

    async fn list_by_company(&self, company_id: CompanyId) -> AppResult<Vec<Principal>> {
        sqlx::query_as::<_, PrincipalRow>(&format!(
            "{SELECT_LIVE} AND company_id = $1 ORDER BY created_at"
        ))
        .bind(company_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list principals", e)
        })?
        .into_iter()
        .map(Principal::try_from)
        .collect()
    }

    async fn record_login(&self, id: PrincipalId) -> AppResult<()> {
        sqlx::query(
            "UPDATE principals SET last_login_at = NOW(), updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record login", e))?;

        Ok(())
    }

    async fn soft_delete(&self, id: PrincipalId) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE principals SET is_deleted = TRUE, updated_at = NOW() \
             WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to soft-delete principal", e)
        })?;

        Ok(result.rows_affected() > 0)
    }
}
