//! # tenanthub-database
//!
//! Persistence for TenantHub: the store traits consumed by the service
//! layer, their PostgreSQL implementations over sqlx, and an in-memory
//! implementation used by tests and local tooling.

pub mod connection;
pub mod memory;
pub mod postgres;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use store::{ClientStore, CompanyStore, CustomerStore, PrincipalStore};
