//! PostgreSQL store implementations.

pub mod client;
pub mod company;
pub mod customer;
pub mod principal;

pub use client::PgClientStore;
pub use company::PgCompanyStore;
pub use customer::PgCustomerStore;
pub use principal::PgPrincipalStore;

use tenanthub_core::error::{AppError, ErrorKind};

/// Map an insert error, translating unique-constraint violations into a
/// conflict with the given message.
pub(crate) fn map_insert_err(e: sqlx::Error, conflict_message: &str, what: &str) -> AppError {
    if let sqlx::Error::Database(db) = &e {
        if db.code().as_deref() == Some("23505") {
            return AppError::conflict(conflict_message);
        }
    }
    AppError::with_source(ErrorKind::Database, format!("Failed to insert {what}"), e)
}
