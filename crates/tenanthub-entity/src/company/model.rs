//! Company entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use tenanthub_core::types::CompanyId;

/// A customer company. Owns principals and clients.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Company {
    /// Unique company identifier.
    pub id: CompanyId,
    /// Display name.
    pub name: String,
    /// Whether the company is active.
    pub is_active: bool,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// When the company was created.
    pub created_at: DateTime<Utc>,
    /// When the company was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Company {
    /// Construct a fresh, active company record.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: CompanyId::new(),
            name: name.into(),
            is_active: true,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Data required to create a new company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCompany {
    /// Company display name.
    pub name: String,
}
