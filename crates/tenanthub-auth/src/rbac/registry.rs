//! Role registry — the explicit role→role creation edge set.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use tenanthub_entity::principal::AccountRole;

/// Catalog of role tiers and the creation edges between them.
///
/// Each edge states "role A may create an account of role B". Edges are
/// explicit and non-transitive: holding an edge to `CustomerAdmin` says
/// nothing about `CustomerUser`. Roles absent from the map have no
/// creation rights, and an unknown target is always denied.
///
/// The registry is read-mostly process-wide state: reads take a shared
/// lock, and the rare administrative mutation (`grant`) takes the write
/// lock. Callers hold it behind an `Arc` and share it across requests.
#[derive(Debug)]
pub struct RoleRegistry {
    /// Role → set of roles it may instantiate.
    edges: RwLock<HashMap<AccountRole, HashSet<AccountRole>>>,
}

impl RoleRegistry {
    /// Build a registry with an empty edge set.
    pub fn empty() -> Self {
        Self {
            edges: RwLock::new(HashMap::new()),
        }
    }

    /// Whether `requester` holds an explicit edge to `target`.
    pub fn can_create(&self, requester: AccountRole, target: AccountRole) -> bool {
        self.edges
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&requester)
            .is_some_and(|targets| targets.contains(&target))
    }

    /// Whether the role is a platform-staff tier.
    ///
    /// Delegated to the entity so the staff flag cannot drift from the
    /// role definition itself.
    pub fn is_staff_role(&self, role: AccountRole) -> bool {
        role.is_staff()
    }

    /// Add a creation edge. Administrative action; edges only ever grow.
    pub fn grant(&self, requester: AccountRole, target: AccountRole) {
        self.edges
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .entry(requester)
            .or_default()
            .insert(target);
    }

    /// The set of roles `requester` may currently create.
    pub fn creatable_by(&self, requester: AccountRole) -> HashSet<AccountRole> {
        self.edges
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&requester)
            .cloned()
            .unwrap_or_default()
    }
}

impl Default for RoleRegistry {
    /// The canonical provisioning policy:
    ///
    /// - staff-admin → staff-employee, customer-super-user, customer-admin,
    ///   customer-user
    /// - staff-employee → customer-super-user, customer-admin, customer-user
    /// - customer-super-user → customer-admin, customer-user
    /// - customer-admin → customer-user
    /// - customer-user → (nothing)
    ///
    /// Note the absence of self-edges: no tier can create its own tier, and
    /// staff-employee cannot create any staff account.
    fn default() -> Self {
        use AccountRole::*;

        let registry = Self::empty();
        for target in [StaffEmployee, CustomerSuperUser, CustomerAdmin, CustomerUser] {
            registry.grant(StaffAdmin, target);
        }
        for target in [CustomerSuperUser, CustomerAdmin, CustomerUser] {
            registry.grant(StaffEmployee, target);
        }
        for target in [CustomerAdmin, CustomerUser] {
            registry.grant(CustomerSuperUser, target);
        }
        registry.grant(CustomerAdmin, CustomerUser);
        registry
    }
}
