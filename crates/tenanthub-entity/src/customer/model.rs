//! Customer entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use tenanthub_core::types::{ClientId, CustomerId};

use crate::client::ContactDetails;

/// A customer of a client.
///
/// `client_id` is immutable after creation — a customer is never
/// re-parented to a different client.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Customer {
    /// Unique customer identifier.
    pub id: CustomerId,
    /// Owning client (required, immutable).
    pub client_id: ClientId,
    /// Display name.
    pub name: String,
    /// Contact and descriptive fields.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub contact: ContactDetails,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// When the customer was created.
    pub created_at: DateTime<Utc>,
    /// When the customer was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// Construct a fresh customer row.
    pub fn new(create: &CreateCustomer) -> Self {
        let now = Utc::now();
        Self {
            id: CustomerId::new(),
            client_id: create.client_id,
            name: create.name.clone(),
            contact: create.contact.clone(),
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Data required to create a new customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCustomer {
    /// The client this customer belongs to.
    pub client_id: ClientId,
    /// Display name.
    pub name: String,
    /// Contact and descriptive fields.
    #[serde(flatten)]
    pub contact: ContactDetails,
}
