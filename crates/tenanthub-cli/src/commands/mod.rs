//! CLI command definitions and shared wiring.

pub mod bootstrap;
pub mod client;
pub mod company;
pub mod customer;
pub mod login;
pub mod user;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use tenanthub_auth::jwt::JwtEncoder;
use tenanthub_auth::password::{PasswordHasher, PasswordPolicy};
use tenanthub_auth::rbac::{CompanyScopeGuard, PermissionResolver, RoleRegistry};
use tenanthub_core::config::AppConfig;
use tenanthub_core::error::AppError;
use tenanthub_database::postgres::{
    PgClientStore, PgCompanyStore, PgCustomerStore, PgPrincipalStore,
};
use tenanthub_database::store::{ClientStore, CompanyStore, CustomerStore, PrincipalStore};
use tenanthub_database::DatabasePool;
use tenanthub_service::{
    AccountAuthorizer, AccountFactory, AuthService, ClientService, CompanyService,
    CustomerService, ProvisioningService, RequestContext,
};

/// TenantHub administration CLI.
#[derive(Debug, Parser)]
#[command(name = "tenanthub", version, about)]
pub struct Cli {
    /// Configuration environment (merged over config/default.toml).
    #[arg(long, global = true, default_value = "default")]
    pub env: String,

    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create the first staff-admin account (empty database only).
    Bootstrap(bootstrap::BootstrapArgs),
    /// Verify credentials and print a token.
    Login(login::LoginArgs),
    /// Account provisioning.
    User(user::UserArgs),
    /// Company provisioning.
    Company(company::CompanyArgs),
    /// Client directory.
    Client(client::ClientArgs),
    /// Customer directory.
    Customer(customer::CustomerArgs),
}

impl Cli {
    /// Execute the parsed command.
    pub async fn execute(&self) -> Result<(), AppError> {
        let app = App::build(&self.env).await?;

        match &self.command {
            Command::Bootstrap(args) => bootstrap::execute(&app, args).await,
            Command::Login(args) => login::execute(&app, args).await,
            Command::User(args) => user::execute(&app, args).await,
            Command::Company(args) => company::execute(&app, args).await,
            Command::Client(args) => client::execute(&app, args).await,
            Command::Customer(args) => customer::execute(&app, args).await,
        }
    }
}

/// The wired-up service stack the commands run against.
pub struct App {
    pub principals: Arc<dyn PrincipalStore>,
    pub provisioning: ProvisioningService,
    pub companies: CompanyService,
    pub clients: ClientService,
    pub customers: CustomerService,
    pub auth: AuthService,
    pub hasher: Arc<PasswordHasher>,
}

impl App {
    /// Load configuration, connect to the database, and wire the services.
    pub async fn build(env: &str) -> Result<Self, AppError> {
        let config = AppConfig::load(env)?;
        let pool = DatabasePool::connect(&config.database).await?;

        let registry = Arc::new(RoleRegistry::default());
        let hasher = Arc::new(PasswordHasher::new());
        let policy = Arc::new(PasswordPolicy::new(&config.auth));
        let encoder = Arc::new(JwtEncoder::new(&config.auth));

        let principals: Arc<dyn PrincipalStore> =
            Arc::new(PgPrincipalStore::new(pool.pool().clone()));
        let companies: Arc<dyn CompanyStore> = Arc::new(PgCompanyStore::new(pool.pool().clone()));
        let clients: Arc<dyn ClientStore> = Arc::new(PgClientStore::new(pool.pool().clone()));
        let customers: Arc<dyn CustomerStore> =
            Arc::new(PgCustomerStore::new(pool.pool().clone()));

        let authorizer = AccountAuthorizer::new(
            PermissionResolver::new(registry.clone()),
            CompanyScopeGuard::new(registry),
            companies.clone(),
        );
        let factory = AccountFactory::new(principals.clone(), hasher.clone());

        Ok(Self {
            provisioning: ProvisioningService::new(
                authorizer,
                factory,
                policy.clone(),
                principals.clone(),
            ),
            companies: CompanyService::new(companies, hasher.clone(), policy),
            clients: ClientService::new(clients.clone()),
            customers: CustomerService::new(customers, clients),
            auth: AuthService::new(principals.clone(), hasher.clone(), encoder),
            principals,
            hasher,
        })
    }

    /// Resolve the acting principal for a command.
    pub async fn acting_context(&self, username: &str) -> Result<RequestContext, AppError> {
        let principal = self
            .principals
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Acting user '{username}' not found")))?;

        Ok(RequestContext::new(principal))
    }
}
