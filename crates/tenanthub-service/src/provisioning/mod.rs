//! Account provisioning — the role-scoped account-creation engine.
//!
//! A create-account request passes two independent gates in a fixed order:
//! the permission gate (role registry edges) and then the company-scope
//! gate. Only a request that clears both becomes an
//! [`ApprovedAccountRequest`], which is the sole input the account factory
//! accepts.

pub mod authorizer;
pub mod factory;
pub mod request;
pub mod service;

pub use authorizer::{AccountAuthorizer, ApprovedAccountRequest};
pub use factory::AccountFactory;
pub use request::CreateAccountRequest;
pub use service::ProvisioningService;
