//! # tenanthub-entity
//!
//! Domain entity models for TenantHub. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and flat database
//! entities additionally derive `sqlx::FromRow`.

pub mod client;
pub mod company;
pub mod customer;
pub mod principal;
