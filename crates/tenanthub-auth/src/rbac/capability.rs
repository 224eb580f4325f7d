//! Coarse capability grants for the non-account resources.

use tenanthub_entity::principal::{AccountRole, Principal};

/// A resource-creation capability, distinct from the account-creation
/// edges in the role registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Create a company (and its first super-user).
    AddCompany,
    /// Create a client within the requester's company.
    AddClient,
    /// Create a customer under one of the company's clients.
    AddCustomer,
}

impl Capability {
    /// Whether `role` carries this capability.
    ///
    /// Company creation is staff-only. Client creation is open to every
    /// customer tier; customer creation stops at the admin tier.
    pub fn granted_to(&self, role: AccountRole) -> bool {
        use AccountRole::*;

        match self {
            Self::AddCompany => matches!(role, StaffAdmin | StaffEmployee),
            Self::AddClient => {
                matches!(role, CustomerSuperUser | CustomerAdmin | CustomerUser)
            }
            Self::AddCustomer => matches!(role, CustomerSuperUser | CustomerAdmin),
        }
    }

    /// Whether the principal holds this capability through any of its
    /// roles (or the superuser escape hatch).
    pub fn held_by(&self, principal: &Principal) -> bool {
        principal.is_superuser || principal.roles.iter().any(|role| self.granted_to(*role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use AccountRole::*;

    #[test]
    fn test_company_creation_is_staff_only() {
        assert!(Capability::AddCompany.granted_to(StaffAdmin));
        assert!(Capability::AddCompany.granted_to(StaffEmployee));
        assert!(!Capability::AddCompany.granted_to(CustomerSuperUser));
        assert!(!Capability::AddCompany.granted_to(CustomerAdmin));
        assert!(!Capability::AddCompany.granted_to(CustomerUser));
    }

    #[test]
    fn test_every_customer_tier_can_add_clients() {
        assert!(Capability::AddClient.granted_to(CustomerSuperUser));
        assert!(Capability::AddClient.granted_to(CustomerAdmin));
        assert!(Capability::AddClient.granted_to(CustomerUser));
        assert!(!Capability::AddClient.granted_to(StaffAdmin));
        assert!(!Capability::AddClient.granted_to(StaffEmployee));
    }

    #[test]
    fn test_customer_creation_stops_at_admin_tier() {
        assert!(Capability::AddCustomer.granted_to(CustomerSuperUser));
        assert!(Capability::AddCustomer.granted_to(CustomerAdmin));
        assert!(!Capability::AddCustomer.granted_to(CustomerUser));
        assert!(!Capability::AddCustomer.granted_to(StaffAdmin));
    }
}
