//! Account role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role tiers available in the provisioning hierarchy.
///
/// Two staff tiers operate the platform itself and are never associated
/// with a company; three customer tiers are always scoped to exactly one
/// company. Which tier may create which is *not* encoded here — that is
/// the role registry's job, and the edges there are explicit rather than
/// derived from any ordering of these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccountRole {
    /// Platform administrator; provisions staff and customer accounts.
    StaffAdmin,
    /// Platform employee; provisions customer accounts only.
    StaffEmployee,
    /// The first account of a company, created together with it.
    CustomerSuperUser,
    /// Company administrator.
    CustomerAdmin,
    /// Regular company account.
    CustomerUser,
}

impl AccountRole {
    /// All roles, in descending order of privilege.
    pub const ALL: [AccountRole; 5] = [
        Self::StaffAdmin,
        Self::StaffEmployee,
        Self::CustomerSuperUser,
        Self::CustomerAdmin,
        Self::CustomerUser,
    ];

    /// Whether this is a platform-staff role (never company-scoped).
    pub fn is_staff(&self) -> bool {
        matches!(self, Self::StaffAdmin | Self::StaffEmployee)
    }

    /// Return the stable slug used on the wire and in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StaffAdmin => "staff-admin",
            Self::StaffEmployee => "staff-employee",
            Self::CustomerSuperUser => "customer-super-user",
            Self::CustomerAdmin => "customer-admin",
            Self::CustomerUser => "customer-user",
        }
    }
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AccountRole {
    type Err = tenanthub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "staff-admin" => Ok(Self::StaffAdmin),
            "staff-employee" => Ok(Self::StaffEmployee),
            "customer-super-user" => Ok(Self::CustomerSuperUser),
            "customer-admin" => Ok(Self::CustomerAdmin),
            "customer-user" => Ok(Self::CustomerUser),
            _ => Err(tenanthub_core::AppError::validation(format!(
                "Invalid account role: '{s}'. Expected one of: staff-admin, \
                 staff-employee, customer-super-user, customer-admin, customer-user"
            ))),
        }
    }
}
