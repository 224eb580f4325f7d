//! Company creation and lookup.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use tenanthub_auth::password::{PasswordHasher, PasswordPolicy};
use tenanthub_auth::rbac::Capability;
use tenanthub_core::error::AppError;
use tenanthub_core::types::CompanyId;
use tenanthub_database::store::CompanyStore;
use tenanthub_entity::company::{Company, CreateCompany};
use tenanthub_entity::principal::{AccountRole, CreatePrincipal, Principal};

use crate::context::RequestContext;

/// Request to create a company together with its first super-user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCompanyRequest {
    /// Company display name.
    #[validate(length(min = 1, message = "Company name is required"))]
    pub name: String,
    /// Username of the company's first super-user.
    #[validate(length(min = 3, max = 100, message = "Username must be 3-100 characters"))]
    pub super_user_username: String,
    /// Email of the company's first super-user.
    #[validate(email(message = "Invalid email address"))]
    pub super_user_email: String,
    /// Initial password of the company's first super-user.
    #[validate(length(min = 1, message = "Password is required"))]
    pub super_user_password: String,
}

/// Handles company provisioning.
///
/// A company never exists without an account able to act in it: creation
/// writes the company and its first customer-super-user in one atomic
/// store operation.
#[derive(Debug, Clone)]
pub struct CompanyService {
    /// Company persistence.
    companies: Arc<dyn CompanyStore>,
    /// Credential hashing for the super-user.
    hasher: Arc<PasswordHasher>,
    /// Password policy for the super-user credential.
    policy: Arc<PasswordPolicy>,
}

impl CompanyService {
    /// Creates a new company service.
    pub fn new(
        companies: Arc<dyn CompanyStore>,
        hasher: Arc<PasswordHasher>,
        policy: Arc<PasswordPolicy>,
    ) -> Self {
        Self {
            companies,
            hasher,
            policy,
        }
    }

    /// Create a company and its first super-user, atomically.
    pub async fn create_company(
        &self,
        ctx: &RequestContext,
        request: CreateCompanyRequest,
    ) -> Result<(Company, Principal), AppError> {
        if !Capability::AddCompany.held_by(&ctx.principal) {
            return Err(AppError::authorization(
                "Invalid permissions to create a company.",
            ));
        }

        request
            .validate()
            .map_err(|e| AppError::validation(e.to_string()))?;
        self.policy.validate(&request.super_user_password)?;

        let password_hash = self.hasher.hash_password(&request.super_user_password)?;

        let super_user = CreatePrincipal {
            username: request.super_user_username,
            email: request.super_user_email.to_lowercase(),
            password_hash,
            role: AccountRole::CustomerSuperUser,
            is_superuser: false,
            // Assigned by the store inside the same transaction.
            company_id: None,
            created_by: Some(ctx.principal.id),
        };

        let (company, principal) = self
            .companies
            .insert_with_super_user(
                &CreateCompany {
                    name: request.name,
                },
                &super_user,
            )
            .await?;

        info!(
            company_id = %company.id,
            company = %company.name,
            super_user = %principal.username,
            created_by = %ctx.principal.id,
            "Company created with super-user"
        );

        Ok((company, principal))
    }

    /// Fetch a company by id.
    pub async fn get_company(&self, id: CompanyId) -> Result<Company, AppError> {
        self.companies
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Company not found"))
    }

    /// Soft-delete a company. Staff only.
    pub async fn delete_company(
        &self,
        ctx: &RequestContext,
        id: CompanyId,
    ) -> Result<(), AppError> {
        if !ctx.is_staff() {
            return Err(AppError::authorization(
                "Invalid permissions to delete a company.",
            ));
        }

        if !self.companies.soft_delete(id).await? {
            return Err(AppError::not_found("Company not found"));
        }

        info!(company_id = %id, deleted_by = %ctx.principal.id, "Company deleted");
        Ok(())
    }
}
