//! Company-scoped client creation and directory reads.

use std::sync::Arc;

use tracing::info;

use tenanthub_auth::rbac::Capability;
use tenanthub_core::error::AppError;
use tenanthub_core::types::{ClientId, CompanyId};
use tenanthub_database::store::ClientStore;
use tenanthub_entity::client::{Client, CreateClient};

use crate::context::RequestContext;

/// Handles client operations for company-scoped principals.
#[derive(Debug, Clone)]
pub struct ClientService {
    /// Client persistence.
    clients: Arc<dyn ClientStore>,
}

impl ClientService {
    /// Creates a new client service.
    pub fn new(clients: Arc<dyn ClientStore>) -> Self {
        Self { clients }
    }

    /// The acting principal's company, required for every client write.
    fn own_company(ctx: &RequestContext, action: &str) -> Result<CompanyId, AppError> {
        ctx.principal.company_id.ok_or_else(|| {
            AppError::authorization(format!(
                "You must be associated with a company to {action}."
            ))
        })
    }

    /// Create a client inside the requester's own company.
    pub async fn create_client(
        &self,
        ctx: &RequestContext,
        request: CreateClient,
    ) -> Result<Client, AppError> {
        let company_id = Self::own_company(ctx, "create a client")?;

        if !Capability::AddClient.held_by(&ctx.principal) {
            return Err(AppError::authorization(
                "Invalid permissions to create a client.",
            ));
        }

        let client = self.clients.insert(company_id, &request).await?;

        info!(
            client_id = %client.id,
            company_id = %company_id,
            created_by = %ctx.principal.id,
            "Client created"
        );

        Ok(client)
    }

    /// List clients: staff see all, company principals see their own.
    pub async fn list_clients(&self, ctx: &RequestContext) -> Result<Vec<Client>, AppError> {
        if ctx.is_staff() {
            return self.clients.list_all().await;
        }

        let company_id = Self::own_company(ctx, "list clients")?;
        self.clients.list_by_company(company_id).await
    }

    /// Fetch a client, enforcing the company boundary for non-staff.
    pub async fn get_client(&self, ctx: &RequestContext, id: ClientId) -> Result<Client, AppError> {
        let client = self
            .clients
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::validation("Client does not exist."))?;

        if !ctx.is_staff() && Some(client.company_id) != ctx.principal.company_id {
            return Err(AppError::authorization(
                "Client does not belong to your company.",
            ));
        }

        Ok(client)
    }

    /// Soft-delete a client (and, through the store, its customers).
    pub async fn delete_client(&self, ctx: &RequestContext, id: ClientId) -> Result<(), AppError> {
        // Re-uses the scoped fetch so a foreign client is denied, not deleted.
        let client = self.get_client(ctx, id).await?;

        self.clients.soft_delete(client.id).await?;

        info!(client_id = %id, deleted_by = %ctx.principal.id, "Client deleted");
        Ok(())
    }
}
