//! Login — credential verification and token issuance.

use std::sync::Arc;

use tracing::info;

use tenanthub_auth::jwt::{IssuedToken, JwtEncoder};
use tenanthub_auth::password::PasswordHasher;
use tenanthub_core::error::AppError;
use tenanthub_database::store::PrincipalStore;
use tenanthub_entity::principal::Principal;

/// The result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// The authenticated principal.
    pub principal: Principal,
    /// The signed access token.
    pub token: IssuedToken,
}

/// Authenticates principals and issues tokens.
#[derive(Debug, Clone)]
pub struct AuthService {
    /// Principal lookups.
    principals: Arc<dyn PrincipalStore>,
    /// Credential verification.
    hasher: Arc<PasswordHasher>,
    /// Token issuance.
    encoder: Arc<JwtEncoder>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        principals: Arc<dyn PrincipalStore>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
    ) -> Self {
        Self {
            principals,
            hasher,
            encoder,
        }
    }

    /// Verify the credentials and issue a token.
    ///
    /// Unknown usernames and wrong passwords produce the same error so
    /// that login attempts cannot probe which accounts exist.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, AppError> {
        let invalid = || {
            AppError::authentication("A user with this username and password was not found.")
        };

        let principal = self
            .principals
            .find_by_username(username)
            .await?
            .ok_or_else(invalid)?;

        if !self
            .hasher
            .verify_password(password, &principal.password_hash)?
        {
            return Err(invalid());
        }

        if !principal.can_login() {
            return Err(AppError::authentication(
                "This account has been deactivated.",
            ));
        }

        self.principals.record_login(principal.id).await?;
        let token = self.encoder.issue(&principal)?;

        info!(principal_id = %principal.id, username = %principal.username, "Login");

        Ok(LoginOutcome { principal, token })
    }
}
