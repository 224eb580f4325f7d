//! Permission resolution — aggregates registry edges across held roles.

use std::sync::Arc;

use tenanthub_entity::principal::{AccountRole, Principal};

use super::registry::RoleRegistry;

/// Answers "may this principal create an account of role X?".
///
/// Pure and side-effect-free: the verdict aggregates the registry edges of
/// every role the principal holds (ANY grant suffices), with the
/// `is_superuser` flag as a bootstrap escape hatch. Company scoping is
/// deliberately not considered here — that is the scope guard's concern,
/// and both gates must pass independently.
#[derive(Debug, Clone)]
pub struct PermissionResolver {
    /// The shared role registry.
    registry: Arc<RoleRegistry>,
}

impl PermissionResolver {
    /// Create a resolver over the given registry.
    pub fn new(registry: Arc<RoleRegistry>) -> Self {
        Self { registry }
    }

    /// Whether the principal may create an account of `target` role.
    pub fn has_create_permission(&self, principal: &Principal, target: AccountRole) -> bool {
        if principal.is_superuser {
            return true;
        }

        principal
            .roles
            .iter()
            .any(|role| self.registry.can_create(*role, target))
    }

    /// Access to the underlying registry (used by the scope guard and
    /// capability checks that need the staff classification).
    pub fn registry(&self) -> &RoleRegistry {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use tenanthub_core::types::{CompanyId, PrincipalId};

    use super::*;
    use AccountRole::*;

    fn principal(roles: Vec<AccountRole>, is_superuser: bool) -> Principal {
        let now = Utc::now();
        let company_id = roles
            .iter()
            .all(|r| !r.is_staff())
            .then(CompanyId::new);
        Principal {
            id: PrincipalId::new(),
            username: "tester".to_string(),
            email: "tester@example.com".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            roles,
            is_superuser,
            company_id,
            is_active: true,
            is_deleted: false,
            created_by: None,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    fn resolver() -> PermissionResolver {
        PermissionResolver::new(Arc::new(RoleRegistry::default()))
    }

    #[test]
    fn test_single_role_grants() {
        let resolver = resolver();
        let admin = principal(vec![CustomerAdmin], false);

        assert!(resolver.has_create_permission(&admin, CustomerUser));
        assert!(!resolver.has_create_permission(&admin, CustomerAdmin));
        assert!(!resolver.has_create_permission(&admin, StaffAdmin));
    }

    #[test]
    fn test_any_held_role_suffices() {
        let resolver = resolver();
        let multi = principal(vec![CustomerUser, CustomerSuperUser], false);

        // CustomerUser alone grants nothing; the super-user role carries it.
        assert!(resolver.has_create_permission(&multi, CustomerAdmin));
    }

    #[test]
    fn test_superuser_escape_hatch() {
        let resolver = resolver();
        let root = principal(vec![CustomerUser], true);

        for target in AccountRole::ALL {
            assert!(resolver.has_create_permission(&root, target));
        }
    }

    #[test]
    fn test_no_roles_no_permission() {
        let resolver = resolver();
        let bare = principal(vec![], false);

        assert!(!resolver.has_create_permission(&bare, CustomerUser));
    }
}
