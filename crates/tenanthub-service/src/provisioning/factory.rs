//! The account factory — persists approved requests.

use std::sync::Arc;

use tracing::info;

use tenanthub_auth::password::PasswordHasher;
use tenanthub_core::error::AppError;
use tenanthub_database::store::PrincipalStore;
use tenanthub_entity::principal::{CreatePrincipal, Principal};

use super::authorizer::ApprovedAccountRequest;

/// Builds and persists principals from approved requests.
///
/// No validation lives here: by construction an [`ApprovedAccountRequest`]
/// has already passed both gates. The factory normalizes the email, hashes
/// the credential, and issues exactly one store write — the role assignment
/// rides inside it, so there is no window in which a principal exists
/// without its role.
#[derive(Debug, Clone)]
pub struct AccountFactory {
    /// Principal persistence.
    principals: Arc<dyn PrincipalStore>,
    /// Credential hashing.
    hasher: Arc<PasswordHasher>,
}

impl AccountFactory {
    /// Creates a new account factory.
    pub fn new(principals: Arc<dyn PrincipalStore>, hasher: Arc<PasswordHasher>) -> Self {
        Self { principals, hasher }
    }

    /// Persist the approved request as a new principal.
    pub async fn create(&self, approved: ApprovedAccountRequest) -> Result<Principal, AppError> {
        let password_hash = self.hasher.hash_password(&approved.password)?;

        let create = CreatePrincipal {
            username: approved.username,
            email: approved.email.to_lowercase(),
            password_hash,
            role: approved.role,
            is_superuser: false,
            company_id: approved.company_id,
            created_by: Some(approved.requested_by),
        };

        let principal = self.principals.insert(&create).await?;

        info!(
            principal_id = %principal.id,
            username = %principal.username,
            role = %approved.role,
            company = ?principal.company_id,
            "Account created"
        );

        Ok(principal)
    }
}
