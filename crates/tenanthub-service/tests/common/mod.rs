#![allow(dead_code)] // each test binary uses a different slice of the harness

//! Shared harness for the service integration tests.
//!
//! Wires every service over a single in-memory store, the default role
//! registry, and default credential configuration — the same wiring the
//! CLI performs against PostgreSQL.

use std::sync::Arc;

use tenanthub_auth::jwt::JwtEncoder;
use tenanthub_auth::password::{PasswordHasher, PasswordPolicy};
use tenanthub_auth::rbac::{CompanyScopeGuard, PermissionResolver, RoleRegistry};
use tenanthub_core::config::AuthConfig;
use tenanthub_core::types::CompanyId;
use tenanthub_database::memory::MemoryStore;
use tenanthub_database::store::{ClientStore, CompanyStore, CustomerStore, PrincipalStore};
use tenanthub_entity::principal::{AccountRole, CreatePrincipal, Principal};
use tenanthub_service::{
    AccountAuthorizer, AccountFactory, AuthService, ClientService, CompanyService,
    CustomerService, ProvisioningService, RequestContext,
};

/// The password used for every seeded account.
pub const TEST_PASSWORD: &str = "Password01";

/// Fully wired service stack over one in-memory store.
pub struct TestHarness {
    pub store: Arc<MemoryStore>,
    pub provisioning: ProvisioningService,
    pub companies: CompanyService,
    pub clients: ClientService,
    pub customers: CustomerService,
    pub auth: AuthService,
    pub hasher: Arc<PasswordHasher>,
}

impl TestHarness {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let registry = Arc::new(RoleRegistry::default());
        let config = AuthConfig::default();

        let hasher = Arc::new(PasswordHasher::new());
        let policy = Arc::new(PasswordPolicy::new(&config));
        let encoder = Arc::new(JwtEncoder::new(&config));

        let principals: Arc<dyn PrincipalStore> = store.clone();
        let companies: Arc<dyn CompanyStore> = store.clone();
        let clients: Arc<dyn ClientStore> = store.clone();
        let customers: Arc<dyn CustomerStore> = store.clone();

        let authorizer = AccountAuthorizer::new(
            PermissionResolver::new(registry.clone()),
            CompanyScopeGuard::new(registry),
            companies.clone(),
        );
        let factory = AccountFactory::new(principals.clone(), hasher.clone());

        Self {
            provisioning: ProvisioningService::new(
                authorizer,
                factory,
                policy.clone(),
                principals.clone(),
            ),
            companies: CompanyService::new(companies, hasher.clone(), policy),
            clients: ClientService::new(clients.clone()),
            customers: CustomerService::new(customers, clients),
            auth: AuthService::new(principals, hasher.clone(), encoder),
            hasher,
            store,
        }
    }

    /// Seed a principal directly into the store, bypassing authorization.
    pub async fn seed(
        &self,
        username: &str,
        role: AccountRole,
        company_id: Option<CompanyId>,
    ) -> Principal {
        let create = CreatePrincipal {
            username: username.to_string(),
            email: format!("{}@example.com", username.to_lowercase()),
            password_hash: self.hasher.hash_password(TEST_PASSWORD).expect("hash"),
            role,
            is_superuser: false,
            company_id,
            created_by: None,
        };

        PrincipalStore::insert(self.store.as_ref(), &create)
            .await
            .expect("seed principal")
    }

    /// Seed an empty company.
    pub async fn seed_company(&self, name: &str) -> CompanyId {
        CompanyStore::insert(
            self.store.as_ref(),
            &tenanthub_entity::company::CreateCompany {
                name: name.to_string(),
            },
        )
        .await
        .expect("seed company")
        .id
    }

    /// Build a request context for a seeded principal.
    pub fn ctx(&self, principal: &Principal) -> RequestContext {
        RequestContext::new(principal.clone())
    }
}
