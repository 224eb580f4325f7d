//! Store traits — the persistence collaborators consumed by services.
//!
//! Each trait has two implementations: a PostgreSQL-backed one in
//! [`crate::postgres`] and an in-memory one in [`crate::memory`]. All
//! default queries exclude soft-deleted rows; deletes only ever flip the
//! `is_deleted` flag.

use async_trait::async_trait;

use tenanthub_core::result::AppResult;
use tenanthub_core::types::{ClientId, CompanyId, CustomerId, PrincipalId};
use tenanthub_entity::client::{Client, CreateClient};
use tenanthub_entity::company::{Company, CreateCompany};
use tenanthub_entity::customer::{CreateCustomer, Customer};
use tenanthub_entity::principal::{CreatePrincipal, Principal};

/// Persistence operations for principals.
///
/// `insert` is a single atomic write: the role assignment travels with the
/// principal row, so a principal can never be observed without its role.
/// A username or email collision surfaces as `ErrorKind::Conflict`.
#[async_trait]
pub trait PrincipalStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a live principal by primary key.
    async fn find_by_id(&self, id: PrincipalId) -> AppResult<Option<Principal>>;

    /// Find a live principal by username (case-insensitive).
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Principal>>;

    /// Find a live principal by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Principal>>;

    /// Persist a new principal and return the stored record.
    async fn insert(&self, create: &CreatePrincipal) -> AppResult<Principal>;

    /// List the live principals of a company.
    async fn list_by_company(&self, company_id: CompanyId) -> AppResult<Vec<Principal>>;

    /// Stamp a successful login.
    async fn record_login(&self, id: PrincipalId) -> AppResult<()>;

    /// Soft-delete a principal. Returns `true` if a live row was flagged.
    async fn soft_delete(&self, id: PrincipalId) -> AppResult<bool>;
}

/// Persistence operations for companies.
#[async_trait]
pub trait CompanyStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a live company by primary key.
    async fn find_by_id(&self, id: CompanyId) -> AppResult<Option<Company>>;

    /// Persist a new company.
    async fn insert(&self, create: &CreateCompany) -> AppResult<Company>;

    /// Persist a company together with its first super-user principal.
    ///
    /// The two writes succeed or fail together; a company without its
    /// super-user (or the reverse) must never be observable. The
    /// super-user's `company_id` is assigned by the store.
    async fn insert_with_super_user(
        &self,
        create: &CreateCompany,
        super_user: &CreatePrincipal,
    ) -> AppResult<(Company, Principal)>;

    /// Soft-delete a company. Returns `true` if a live row was flagged.
    async fn soft_delete(&self, id: CompanyId) -> AppResult<bool>;
}

/// Persistence operations for clients.
#[async_trait]
pub trait ClientStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a live client by primary key.
    async fn find_by_id(&self, id: ClientId) -> AppResult<Option<Client>>;

    /// Persist a new client under `company_id`.
    async fn insert(&self, company_id: CompanyId, create: &CreateClient) -> AppResult<Client>;

    /// List the live clients of a company.
    async fn list_by_company(&self, company_id: CompanyId) -> AppResult<Vec<Client>>;

    /// List all live clients (staff directory view).
    async fn list_all(&self) -> AppResult<Vec<Client>>;

    /// Soft-delete a client and all of its customers.
    async fn soft_delete(&self, id: ClientId) -> AppResult<bool>;
}

/// Persistence operations for customers.
#[async_trait]
pub trait CustomerStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a live customer by primary key.
    async fn find_by_id(&self, id: CustomerId) -> AppResult<Option<Customer>>;

    /// Persist a new customer.
    async fn insert(&self, create: &CreateCustomer) -> AppResult<Customer>;

    /// List the live customers of a client.
    async fn list_by_client(&self, client_id: ClientId) -> AppResult<Vec<Customer>>;

    /// List the live customers across all of a company's clients.
    async fn list_by_company(&self, company_id: CompanyId) -> AppResult<Vec<Customer>>;

    /// Soft-delete a customer. Returns `true` if a live row was flagged.
    async fn soft_delete(&self, id: CustomerId) -> AppResult<bool>;
}
