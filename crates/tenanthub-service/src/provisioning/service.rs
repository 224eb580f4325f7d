//! Provisioning facade — validation, authorization, and creation in one call.

use std::sync::Arc;

use tenanthub_auth::password::PasswordPolicy;
use tenanthub_core::error::AppError;
use tenanthub_database::store::PrincipalStore;
use tenanthub_entity::principal::Principal;

use crate::context::RequestContext;

use super::authorizer::AccountAuthorizer;
use super::factory::AccountFactory;
use super::request::CreateAccountRequest;

/// The public entry point for account creation.
#[derive(Debug, Clone)]
pub struct ProvisioningService {
    /// Admission control.
    authorizer: AccountAuthorizer,
    /// Record construction and persistence.
    factory: AccountFactory,
    /// Password policy for new credentials.
    policy: Arc<PasswordPolicy>,
    /// Uniqueness pre-checks.
    principals: Arc<dyn PrincipalStore>,
}

impl ProvisioningService {
    /// Creates a new provisioning service.
    pub fn new(
        authorizer: AccountAuthorizer,
        factory: AccountFactory,
        policy: Arc<PasswordPolicy>,
        principals: Arc<dyn PrincipalStore>,
    ) -> Self {
        Self {
            authorizer,
            factory,
            policy,
            principals,
        }
    }

    /// Create a new account on behalf of the acting principal.
    ///
    /// Field validation runs first (400-class failures), then the
    /// authorization gates (403-class denials, except the unresolved
    /// company reference which stays 400-class), then uniqueness, then
    /// the single persisting write.
    pub async fn create_account(
        &self,
        ctx: &RequestContext,
        request: CreateAccountRequest,
    ) -> Result<Principal, AppError> {
        request.validate_fields()?;
        self.policy.validate(&request.password)?;

        let approved = self.authorizer.authorize(ctx, &request).await?;

        // The store's unique constraint is the real arbiter; this check
        // just answers the common case without consuming an id.
        if self
            .principals
            .find_by_username(&request.username)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("User already exists."));
        }

        self.factory.create(approved).await
    }
}
