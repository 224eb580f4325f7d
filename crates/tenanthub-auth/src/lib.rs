//! # tenanthub-auth
//!
//! Authorization and credential handling for TenantHub.
//!
//! ## Modules
//!
//! - `rbac` — role registry (typed creation edges), permission resolution,
//!   company scoping, and coarse capability grants
//! - `password` — Argon2id password hashing and policy enforcement
//! - `jwt` — JWT token creation and validation
//!
//! This crate performs no IO: company existence is resolved by callers and
//! passed into the scope guard, which keeps every decision here pure and
//! deterministic.

pub mod jwt;
pub mod password;
pub mod rbac;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordPolicy};
pub use rbac::{
    Capability, CompanyRef, CompanyScopeGuard, PermissionResolver, RoleRegistry, ScopeError,
};
