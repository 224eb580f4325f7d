//! Client entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use tenanthub_core::types::{ClientId, CompanyId};

/// Contact and descriptive fields shared by clients and customers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
pub struct ContactDetails {
    /// Account reference number.
    pub account_number: String,
    /// Mobile phone number.
    pub mobile_number: Option<String>,
    /// Landline phone number.
    pub landline_number: Option<String>,
    /// Contact email address.
    pub email: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Details of any installed systems.
    pub system_details: Option<String>,
}

/// A client of a company.
///
/// `company_id` is immutable after creation — a client is never
/// re-parented to a different company.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Client {
    /// Unique client identifier.
    pub id: ClientId,
    /// Owning company (required, immutable).
    pub company_id: CompanyId,
    /// Display name.
    pub name: String,
    /// Contact and descriptive fields.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub contact: ContactDetails,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// When the client was created.
    pub created_at: DateTime<Utc>,
    /// When the client was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Client {
    /// Construct a fresh client row under `company_id`.
    pub fn new(company_id: CompanyId, create: &CreateClient) -> Self {
        let now = Utc::now();
        Self {
            id: ClientId::new(),
            company_id,
            name: create.name.clone(),
            contact: create.contact.clone(),
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Data required to create a new client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClient {
    /// Display name.
    pub name: String,
    /// Contact and descriptive fields.
    #[serde(flatten)]
    pub contact: ContactDetails,
}
