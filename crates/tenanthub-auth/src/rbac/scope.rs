//! Company scoping — keeps account creation inside the requester's company.

use std::sync::Arc;

use thiserror::Error;

use tenanthub_core::types::CompanyId;
use tenanthub_entity::principal::{AccountRole, Principal};

use super::registry::RoleRegistry;

/// The target-company reference of a create-account request, after the
/// caller has tried to resolve it against the company store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanyRef {
    /// No company reference was supplied.
    Absent,
    /// A reference was supplied but does not resolve to a live company
    /// (unknown id, or not an id at all).
    Unresolved,
    /// The reference resolves to this live company.
    Resolved(CompanyId),
}

impl CompanyRef {
    /// Whether any reference was supplied, resolvable or not.
    pub fn is_present(&self) -> bool {
        !matches!(self, Self::Absent)
    }
}

/// Why a create-account request failed the company-scope check.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ScopeError {
    /// A staff-tier account was requested with a company attached.
    #[error("staff accounts cannot be associated with a company")]
    StaffCannotHaveCompany,

    /// The requester is customer-tier but has no company of its own.
    /// This is corrupted prior state, not a user mistake.
    #[error("requesting principal does not belong to a company")]
    PrincipalNotInCompany,

    /// The target company is not the requester's own company.
    #[error("target company is outside the requester's company")]
    CrossCompanyDenied,

    /// A staff-initiated customer-tier creation referenced a company that
    /// does not resolve. Input validation, not a permission problem.
    #[error("target company does not resolve to an existing company")]
    UnknownCompany,
}

/// Enforces the company-boundary rules for account creation.
///
/// Evaluated independently of the permission resolver; both gates must
/// pass. The guard itself performs no IO: the caller resolves the raw
/// company reference against its store and passes the [`CompanyRef`] in.
#[derive(Debug, Clone)]
pub struct CompanyScopeGuard {
    /// The shared role registry (staff classification).
    registry: Arc<RoleRegistry>,
}

impl CompanyScopeGuard {
    /// Create a guard over the given registry.
    pub fn new(registry: Arc<RoleRegistry>) -> Self {
        Self { registry }
    }

    /// Check the company-consistency rules, in order:
    ///
    /// 1. A staff `target_role` must carry no company reference at all.
    /// 2. A customer-tier `target_role` requested by a staff principal must
    ///    reference a company that resolves.
    /// 3. A customer-tier `target_role` requested by a customer-tier
    ///    principal must reference exactly the requester's own company —
    ///    an absent, unresolved, or foreign reference is all the same
    ///    cross-company denial; which ids exist is not leaked.
    pub fn check(
        &self,
        principal: &Principal,
        target_role: AccountRole,
        target_company: CompanyRef,
    ) -> Result<(), ScopeError> {
        if self.registry.is_staff_role(target_role) {
            return if target_company.is_present() {
                Err(ScopeError::StaffCannotHaveCompany)
            } else {
                Ok(())
            };
        }

        let requester_is_staff = principal.is_superuser
            || principal.roles.iter().any(|r| self.registry.is_staff_role(*r));

        if requester_is_staff {
            return match target_company {
                CompanyRef::Resolved(_) => Ok(()),
                CompanyRef::Absent | CompanyRef::Unresolved => Err(ScopeError::UnknownCompany),
            };
        }

        let own_company = principal
            .company_id
            .ok_or(ScopeError::PrincipalNotInCompany)?;

        if target_company == CompanyRef::Resolved(own_company) {
            Ok(())
        } else {
            Err(ScopeError::CrossCompanyDenied)
        }
    }
}
