//! Role-based access control: who may create whom, and inside which company.

pub mod capability;
pub mod registry;
pub mod resolver;
pub mod scope;

pub use capability::Capability;
pub use registry::RoleRegistry;
pub use resolver::PermissionResolver;
pub use scope::{CompanyRef, CompanyScopeGuard, ScopeError};
