//! In-memory store backend.
//!
//! Implements every store trait over mutex-guarded maps. Used by the
//! service test-suites and by local tooling that runs without PostgreSQL.
//! Compound writes hold the single lock for their whole critical section,
//! which gives them the same all-or-nothing behavior as a transaction.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use tenanthub_core::error::AppError;
use tenanthub_core::result::AppResult;
use tenanthub_core::types::{ClientId, CompanyId, CustomerId, PrincipalId};
use tenanthub_entity::client::{Client, CreateClient};
use tenanthub_entity::company::{Company, CreateCompany};
use tenanthub_entity::customer::{CreateCustomer, Customer};
use tenanthub_entity::principal::{CreatePrincipal, Principal};

use crate::store::{ClientStore, CompanyStore, CustomerStore, PrincipalStore};

#[derive(Debug, Default)]
struct Inner {
    principals: HashMap<PrincipalId, Principal>,
    companies: HashMap<CompanyId, Company>,
    clients: HashMap<ClientId, Client>,
    customers: HashMap<CustomerId, Customer>,
}

impl Inner {
    /// Uniqueness spans soft-deleted rows too, mirroring the database
    /// constraints on the physical table.
    fn principal_exists(&self, username: &str, email: &str) -> bool {
        self.principals.values().any(|p| {
            p.username.eq_ignore_ascii_case(username) || p.email.eq_ignore_ascii_case(email)
        })
    }
}

/// In-memory implementation of all TenantHub stores.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Number of companies held, soft-deleted included. Test support.
    pub fn company_count(&self) -> usize {
        self.lock().companies.len()
    }

    /// Number of principals held, soft-deleted included. Test support.
    pub fn principal_count(&self) -> usize {
        self.lock().principals.len()
    }
}

#[async_trait]
impl PrincipalStore for MemoryStore {
    async fn find_by_id(&self, id: PrincipalId) -> AppResult<Option<Principal>> {
        Ok(self
            .lock()
            .principals
            .get(&id)
            .filter(|p| !p.is_deleted)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Principal>> {
        Ok(self
            .lock()
            .principals
            .values()
            .find(|p| !p.is_deleted && p.username.eq_ignore_ascii_case(username))
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Principal>> {
        Ok(self
            .lock()
            .principals
            .values()
            .find(|p| !p.is_deleted && p.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn insert(&self, create: &CreatePrincipal) -> AppResult<Principal> {
        let mut inner = self.lock();

        if inner.principal_exists(&create.username, &create.email) {
            return Err(AppError::conflict("User already exists."));
        }

        let principal = create.materialize();
        inner.principals.insert(principal.id, principal.clone());
        Ok(principal)
    }

    async fn list_by_company(&self, company_id: CompanyId) -> AppResult<Vec<Principal>> {
        let mut principals: Vec<Principal> = self
            .lock()
            .principals
            .values()
            .filter(|p| !p.is_deleted && p.company_id == Some(company_id))
            .cloned()
            .collect();
        principals.sort_by_key(|p| p.created_at);
        Ok(principals)
    }

    async fn record_login(&self, id: PrincipalId) -> AppResult<()> {
        if let Some(principal) = self.lock().principals.get_mut(&id) {
            let now = chrono::Utc::now();
            principal.last_login_at = Some(now);
            principal.updated_at = now;
        }
        Ok(())
    }

    async fn soft_delete(&self, id: PrincipalId) -> AppResult<bool> {
        match self.lock().principals.get_mut(&id) {
            Some(principal) if !principal.is_deleted => {
                principal.is_deleted = true;
                principal.updated_at = chrono::Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[async_trait]
impl CompanyStore for MemoryStore {
    async fn find_by_id(&self, id: CompanyId) -> AppResult<Option<Company>> {
        Ok(self
            .lock()
            .companies
            .get(&id)
            .filter(|c| !c.is_deleted)
            .cloned())
    }

    async fn insert(&self, create: &CreateCompany) -> AppResult<Company> {
        let company = Company::new(&create.name);
        self.lock().companies.insert(company.id, company.clone());
        Ok(company)
    }

    async fn insert_with_super_user(
        &self,
        create: &CreateCompany,
        super_user: &CreatePrincipal,
    ) -> AppResult<(Company, Principal)> {
        let mut inner = self.lock();

        // Check the principal first so a conflict leaves no half-created
        // company behind.
        if inner.principal_exists(&super_user.username, &super_user.email) {
            return Err(AppError::conflict("User already exists."));
        }

        let company = Company::new(&create.name);
        let mut super_user = super_user.clone();
        super_user.company_id = Some(company.id);
        let principal = super_user.materialize();

        inner.companies.insert(company.id, company.clone());
        inner.principals.insert(principal.id, principal.clone());
        Ok((company, principal))
    }

    async fn soft_delete(&self, id: CompanyId) -> AppResult<bool> {
        match self.lock().companies.get_mut(&id) {
            Some(company) if !company.is_deleted => {
                company.is_deleted = true;
                company.updated_at = chrono::Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[async_trait]
impl ClientStore for MemoryStore {
    async fn find_by_id(&self, id: ClientId) -> AppResult<Option<Client>> {
        Ok(self
            .lock()
            .clients
            .get(&id)
            .filter(|c| !c.is_deleted)
            .cloned())
    }

    async fn insert(&self, company_id: CompanyId, create: &CreateClient) -> AppResult<Client> {
        let client = Client::new(company_id, create);
        self.lock().clients.insert(client.id, client.clone());
        Ok(client)
    }

    async fn list_by_company(&self, company_id: CompanyId) -> AppResult<Vec<Client>> {
        let mut clients: Vec<Client> = self
            .lock()
            .clients
            .values()
            .filter(|c| !c.is_deleted && c.company_id == company_id)
            .cloned()
            .collect();
        clients.sort_by_key(|c| c.created_at);
        Ok(clients)
    }

    async fn list_all(&self) -> AppResult<Vec<Client>> {
        let mut clients: Vec<Client> = self
            .lock()
            .clients
            .values()
            .filter(|c| !c.is_deleted)
            .cloned()
            .collect();
        clients.sort_by_key(|c| c.created_at);
        Ok(clients)
    }

    async fn soft_delete(&self, id: ClientId) -> AppResult<bool> {
        let mut inner = self.lock();
        let now = chrono::Utc::now();

        let flagged = match inner.clients.get_mut(&id) {
            Some(client) if !client.is_deleted => {
                client.is_deleted = true;
                client.updated_at = now;
                true
            }
            _ => false,
        };

        if flagged {
            for customer in inner
                .customers
                .values_mut()
                .filter(|c| c.client_id == id && !c.is_deleted)
            {
                customer.is_deleted = true;
                customer.updated_at = now;
            }
        }

        Ok(flagged)
    }
}

#[async_trait]
impl CustomerStore for MemoryStore {
    async fn find_by_id(&self, id: CustomerId) -> AppResult<Option<Customer>> {
        Ok(self
            .lock()
            .customers
            .get(&id)
            .filter(|c| !c.is_deleted)
            .cloned())
    }

    async fn insert(&self, create: &CreateCustomer) -> AppResult<Customer> {
        let customer = Customer::new(create);
        self.lock().customers.insert(customer.id, customer.clone());
        Ok(customer)
    }

    async fn list_by_client(&self, client_id: ClientId) -> AppResult<Vec<Customer>> {
        let mut customers: Vec<Customer> = self
            .lock()
            .customers
            .values()
            .filter(|c| !c.is_deleted && c.client_id == client_id)
            .cloned()
            .collect();
        customers.sort_by_key(|c| c.created_at);
        Ok(customers)
    }

    async fn list_by_company(&self, company_id: CompanyId) -> AppResult<Vec<Customer>> {
        let inner = self.lock();
        let mut customers: Vec<Customer> = inner
            .customers
            .values()
            .filter(|c| {
                !c.is_deleted
                    && inner
                        .clients
                        .get(&c.client_id)
                        .is_some_and(|client| !client.is_deleted && client.company_id == company_id)
            })
            .cloned()
            .collect();
        customers.sort_by_key(|c| c.created_at);
        Ok(customers)
    }

    async fn soft_delete(&self, id: CustomerId) -> AppResult<bool> {
        match self.lock().customers.get_mut(&id) {
            Some(customer) if !customer.is_deleted => {
                customer.is_deleted = true;
                customer.updated_at = chrono::Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use tenanthub_entity::principal::AccountRole;

    use super::*;

    fn create_principal(username: &str, company_id: Option<CompanyId>) -> CreatePrincipal {
        CreatePrincipal {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "$argon2id$stub".to_string(),
            role: AccountRole::CustomerUser,
            is_superuser: false,
            company_id,
            created_by: None,
        }
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let store = MemoryStore::new();
        let create = create_principal("dupe", None);

        PrincipalStore::insert(&store, &create).await.unwrap();
        let err = PrincipalStore::insert(&store, &create).await.unwrap_err();
        assert_eq!(err.kind, tenanthub_core::ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_soft_deleted_principal_is_invisible_but_blocks_reuse() {
        let store = MemoryStore::new();
        let principal = PrincipalStore::insert(&store, &create_principal("ghost", None))
            .await
            .unwrap();

        assert!(PrincipalStore::soft_delete(&store, principal.id).await.unwrap());
        assert!(store.find_by_username("ghost").await.unwrap().is_none());

        // The username stays burned even after the soft delete.
        let err = PrincipalStore::insert(&store, &create_principal("ghost", None))
            .await
            .unwrap_err();
        assert_eq!(err.kind, tenanthub_core::ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_company_super_user_pair_is_atomic() {
        let store = MemoryStore::new();
        PrincipalStore::insert(&store, &create_principal("taken", None))
            .await
            .unwrap();

        let result = store
            .insert_with_super_user(
                &CreateCompany {
                    name: "Acme".to_string(),
                },
                &create_principal("taken", None),
            )
            .await;

        assert!(result.is_err());
        // The conflicting super-user must not leave a company behind.
        assert!(store.lock().companies.is_empty());
    }

    #[tokio::test]
    async fn test_client_soft_delete_cascades_to_customers() {
        let store = MemoryStore::new();
        let company = CompanyStore::insert(
            &store,
            &CreateCompany {
                name: "Acme".to_string(),
            },
        )
        .await
        .unwrap();

        let client = ClientStore::insert(
            &store,
            company.id,
            &CreateClient {
                name: "Site".to_string(),
                contact: Default::default(),
            },
        )
        .await
        .unwrap();

        let customer = CustomerStore::insert(
            &store,
            &CreateCustomer {
                client_id: client.id,
                name: "End customer".to_string(),
                contact: Default::default(),
            },
        )
        .await
        .unwrap();

        assert!(ClientStore::soft_delete(&store, client.id).await.unwrap());
        assert!(CustomerStore::find_by_id(&store, customer.id)
            .await
            .unwrap()
            .is_none());
    }
}
