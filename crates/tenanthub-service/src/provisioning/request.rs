//! The transient create-account request.

use serde::{Deserialize, Serialize};
use validator::Validate;

use tenanthub_core::error::AppError;
use tenanthub_entity::principal::AccountRole;

/// A request to create a new account. Transient — never persisted.
///
/// The company reference is carried in raw string form; the authorizer
/// resolves it against the company store. Field-shape problems are
/// caught by [`Validate`] before any gate runs.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAccountRequest {
    /// Desired login name.
    #[validate(length(min = 3, max = 100, message = "Username must be 3-100 characters"))]
    pub username: String,
    /// Email address.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Initial password (plaintext; hashed by the factory).
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Requested role.
    pub role: AccountRole,
    /// Target company reference (absent for staff accounts).
    pub company: Option<String>,
}

impl CreateAccountRequest {
    /// Run field validation, folding violations into a single
    /// validation error.
    pub fn validate_fields(&self) -> Result<(), AppError> {
        self.validate()
            .map_err(|e| AppError::validation(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_malformed_email() {
        let request = CreateAccountRequest {
            username: "newuser".to_string(),
            email: "not-an-email".to_string(),
            password: "Password01".to_string(),
            role: AccountRole::CustomerUser,
            company: None,
        };

        assert!(request.validate_fields().is_err());
    }

    #[test]
    fn test_role_slug_deserialization() {
        let request: CreateAccountRequest = serde_json::from_value(serde_json::json!({
            "username": "newuser",
            "email": "newuser@example.com",
            "password": "Password01",
            "role": "customer-super-user",
            "company": null,
        }))
        .expect("deserialize");

        assert_eq!(request.role, AccountRole::CustomerSuperUser);
    }
}
