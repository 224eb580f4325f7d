//! Principal entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tenanthub_core::types::{CompanyId, PrincipalId};

use super::role::AccountRole;

/// An authenticated account in the TenantHub system.
///
/// # Invariants
/// - A staff-tier principal's `company_id` is always `None`.
/// - A customer-tier principal's `company_id` is always `Some` once created.
/// - `roles` is non-empty; the creation authorizer assigns the first role.
/// - Principals are soft-deleted only; `is_deleted` rows never come back
///   from default store queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    /// Unique principal identifier.
    pub id: PrincipalId,
    /// Unique login name.
    pub username: String,
    /// Email address, stored lower-cased.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Assigned roles (at least one).
    pub roles: Vec<AccountRole>,
    /// Bootstrapping escape hatch: bypasses the role registry entirely.
    pub is_superuser: bool,
    /// The company this principal belongs to (`None` for staff).
    pub company_id: Option<CompanyId>,
    /// Whether the account may authenticate.
    pub is_active: bool,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// The principal that created this account, if provisioned.
    pub created_by: Option<PrincipalId>,
    /// When the principal was created.
    pub created_at: DateTime<Utc>,
    /// When the principal was last updated.
    pub updated_at: DateTime<Utc>,
    /// Last successful login time.
    pub last_login_at: Option<DateTime<Utc>>,
}

impl Principal {
    /// Whether any of the held roles is a staff role.
    pub fn holds_staff_role(&self) -> bool {
        self.roles.iter().any(AccountRole::is_staff)
    }

    /// Whether this principal may authenticate right now.
    pub fn can_login(&self) -> bool {
        self.is_active && !self.is_deleted
    }
}

/// Data required to persist a new principal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePrincipal {
    /// Desired username.
    pub username: String,
    /// Email address (already normalized).
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Role assignment.
    pub role: AccountRole,
    /// Bootstrapping escape hatch; false for every provisioned account.
    pub is_superuser: bool,
    /// Company linkage (`None` for staff roles).
    pub company_id: Option<CompanyId>,
    /// Creating principal's ID, if provisioned rather than bootstrapped.
    pub created_by: Option<PrincipalId>,
}

impl CreatePrincipal {
    /// Materialize a full principal row, stamping identifier and timestamps.
    ///
    /// Stores call this at insert time so that both backends produce
    /// identical records.
    pub fn materialize(&self) -> Principal {
        let now = Utc::now();
        Principal {
            id: PrincipalId::new(),
            username: self.username.clone(),
            email: self.email.clone(),
            password_hash: self.password_hash.clone(),
            roles: vec![self.role],
            is_superuser: self.is_superuser,
            company_id: self.company_id,
            is_active: true,
            is_deleted: false,
            created_by: self.created_by,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(roles: Vec<AccountRole>, company_id: Option<CompanyId>) -> Principal {
        let now = Utc::now();
        Principal {
            id: PrincipalId::new(),
            username: "sample".to_string(),
            email: "sample@example.com".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            roles,
            is_superuser: false,
            company_id,
            is_active: true,
            is_deleted: false,
            created_by: None,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    #[test]
    fn test_holds_staff_role() {
        let staff = sample(vec![AccountRole::StaffEmployee], None);
        assert!(staff.holds_staff_role());

        let customer = sample(vec![AccountRole::CustomerAdmin], Some(CompanyId::new()));
        assert!(!customer.holds_staff_role());
    }

    #[test]
    fn test_deleted_principal_cannot_login() {
        let mut p = sample(vec![AccountRole::CustomerUser], Some(CompanyId::new()));
        assert!(p.can_login());
        p.is_deleted = true;
        assert!(!p.can_login());
    }

    #[test]
    fn test_password_hash_is_never_serialized() {
        let p = sample(vec![AccountRole::CustomerUser], Some(CompanyId::new()));
        let json = serde_json::to_string(&p).expect("serialize");
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("argon2id"));
    }
}
