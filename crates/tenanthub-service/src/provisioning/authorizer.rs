//! The account-creation authorizer — admission control for new accounts.

use std::sync::Arc;

use tracing::{debug, error};

use tenanthub_auth::rbac::{CompanyRef, CompanyScopeGuard, PermissionResolver, ScopeError};
use tenanthub_core::error::AppError;
use tenanthub_core::types::{CompanyId, PrincipalId};
use tenanthub_database::store::CompanyStore;
use tenanthub_entity::principal::AccountRole;

use crate::context::RequestContext;

use super::request::CreateAccountRequest;

/// A create-account request that has cleared both authorization gates.
///
/// Only the authorizer can construct this, which is what entitles the
/// account factory to skip all validation. The company linkage is already
/// resolved: `Some` for customer tiers, `None` for staff.
#[derive(Debug, Clone)]
pub struct ApprovedAccountRequest {
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) password: String,
    pub(crate) role: AccountRole,
    pub(crate) company_id: Option<CompanyId>,
    pub(crate) requested_by: PrincipalId,
}

impl ApprovedAccountRequest {
    /// The role the new account will hold.
    pub fn role(&self) -> AccountRole {
        self.role
    }

    /// The company the new account will belong to (`None` for staff).
    pub fn company_id(&self) -> Option<CompanyId> {
        self.company_id
    }
}

/// Decides whether a principal may create the requested account.
///
/// Two independent gates run in a fixed order: the permission gate first
/// (role-registry edges, any held role suffices), then the company-scope
/// gate. The order is load-bearing only for which denial message wins —
/// scope denials assume the requester already holds creation rights for
/// the tier. Each call is a one-shot decision; nothing is retried.
#[derive(Debug, Clone)]
pub struct AccountAuthorizer {
    /// Permission gate.
    resolver: PermissionResolver,
    /// Company-scope gate.
    guard: CompanyScopeGuard,
    /// Company lookups for resolving the raw reference.
    companies: Arc<dyn CompanyStore>,
}

impl AccountAuthorizer {
    /// Creates a new authorizer.
    pub fn new(
        resolver: PermissionResolver,
        guard: CompanyScopeGuard,
        companies: Arc<dyn CompanyStore>,
    ) -> Self {
        Self {
            resolver,
            guard,
            companies,
        }
    }

    /// Run the admission decision for `request` on behalf of the acting
    /// principal. Terminal outcomes only: approval, an authorization
    /// denial, or a validation failure — never a partial verdict.
    pub async fn authorize(
        &self,
        ctx: &RequestContext,
        request: &CreateAccountRequest,
    ) -> Result<ApprovedAccountRequest, AppError> {
        let principal = &ctx.principal;

        if !self
            .resolver
            .has_create_permission(principal, request.role)
        {
            debug!(
                requester = %principal.username,
                target_role = %request.role,
                "Account creation denied by permission gate"
            );
            return Err(AppError::authorization(
                "Invalid permissions to create this account type.",
            ));
        }

        let target_company = self.resolve_company_ref(request.company.as_deref()).await?;

        if let Err(scope_err) = self.guard.check(principal, request.role, target_company) {
            return Err(self.map_scope_error(ctx, request, scope_err));
        }

        debug!(
            requester = %principal.username,
            target_role = %request.role,
            "Account creation authorized"
        );

        Ok(ApprovedAccountRequest {
            username: request.username.clone(),
            email: request.email.clone(),
            password: request.password.clone(),
            role: request.role,
            company_id: match target_company {
                CompanyRef::Resolved(id) => Some(id),
                CompanyRef::Absent | CompanyRef::Unresolved => None,
            },
            requested_by: principal.id,
        })
    }

    /// Resolve the raw company reference against the store. A reference
    /// that is not a well-formed id is simply unresolved — it cannot name
    /// an existing company either way.
    async fn resolve_company_ref(&self, raw: Option<&str>) -> Result<CompanyRef, AppError> {
        let Some(raw) = raw else {
            return Ok(CompanyRef::Absent);
        };

        let Ok(id) = raw.parse::<CompanyId>() else {
            return Ok(CompanyRef::Unresolved);
        };

        Ok(match self.companies.find_by_id(id).await? {
            Some(company) => CompanyRef::Resolved(company.id),
            None => CompanyRef::Unresolved,
        })
    }

    /// Map a scope verdict onto the externally visible error taxonomy.
    fn map_scope_error(
        &self,
        ctx: &RequestContext,
        request: &CreateAccountRequest,
        scope_err: ScopeError,
    ) -> AppError {
        match scope_err {
            ScopeError::StaffCannotHaveCompany => AppError::authorization(
                "A staff account cannot be associated with a company.",
            ),
            ScopeError::CrossCompanyDenied => AppError::authorization(
                "You cannot create a user that is not in your company.",
            ),
            ScopeError::PrincipalNotInCompany => {
                // Corrupted prior state: a customer-tier principal without a
                // company should not exist. Surface the generic denial but
                // flag the anomaly loudly.
                error!(
                    requester = %ctx.principal.id,
                    target_role = %request.role,
                    "Customer-tier principal has no company; denying account creation"
                );
                AppError::authorization("You cannot create a user that is not in your company.")
            }
            ScopeError::UnknownCompany => AppError::validation("company does not exist"),
        }
    }
}
