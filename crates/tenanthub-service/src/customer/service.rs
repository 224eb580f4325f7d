//! Company-scoped customer creation and directory reads.

use std::sync::Arc;

use tracing::info;

use tenanthub_auth::rbac::Capability;
use tenanthub_core::error::AppError;
use tenanthub_core::types::{ClientId, CustomerId};
use tenanthub_database::store::{ClientStore, CustomerStore};
use tenanthub_entity::customer::{CreateCustomer, Customer};

use crate::context::RequestContext;

/// Handles customer operations for company-scoped principals.
///
/// A customer hangs off a client, so every write is checked against two
/// boundaries: the requester must belong to a company, and the target
/// client must belong to that same company.
#[derive(Debug, Clone)]
pub struct CustomerService {
    /// Customer persistence.
    customers: Arc<dyn CustomerStore>,
    /// Client lookups for the ownership check.
    clients: Arc<dyn ClientStore>,
}

impl CustomerService {
    /// Creates a new customer service.
    pub fn new(customers: Arc<dyn CustomerStore>, clients: Arc<dyn ClientStore>) -> Self {
        Self { customers, clients }
    }

    /// Create a customer under one of the company's clients.
    pub async fn create_customer(
        &self,
        ctx: &RequestContext,
        request: CreateCustomer,
    ) -> Result<Customer, AppError> {
        let Some(company_id) = ctx.principal.company_id else {
            return Err(AppError::authorization(
                "You must be associated with a company to create a customer.",
            ));
        };

        if !Capability::AddCustomer.held_by(&ctx.principal) {
            return Err(AppError::authorization(
                "Invalid permissions to create a customer.",
            ));
        }

        let client = self
            .clients
            .find_by_id(request.client_id)
            .await?
            .ok_or_else(|| AppError::validation("Client does not exist."))?;

        if client.company_id != company_id {
            return Err(AppError::authorization(
                "Client does not belong to your company.",
            ));
        }

        let customer = self.customers.insert(&request).await?;

        info!(
            customer_id = %customer.id,
            client_id = %client.id,
            company_id = %company_id,
            created_by = %ctx.principal.id,
            "Customer created"
        );

        Ok(customer)
    }

    /// List the customers of one client, enforcing the company boundary.
    pub async fn list_customers(
        &self,
        ctx: &RequestContext,
        client_id: ClientId,
    ) -> Result<Vec<Customer>, AppError> {
        let client = self
            .clients
            .find_by_id(client_id)
            .await?
            .ok_or_else(|| AppError::validation("Client does not exist."))?;

        if !ctx.is_staff() && Some(client.company_id) != ctx.principal.company_id {
            return Err(AppError::authorization(
                "Client does not belong to your company.",
            ));
        }

        self.customers.list_by_client(client_id).await
    }

    /// Soft-delete a customer, enforcing the company boundary.
    pub async fn delete_customer(
        &self,
        ctx: &RequestContext,
        id: CustomerId,
    ) -> Result<(), AppError> {
        let customer = self
            .customers
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Customer not found"))?;

        // The boundary lives on the owning client.
        let client = self
            .clients
            .find_by_id(customer.client_id)
            .await?
            .ok_or_else(|| AppError::not_found("Customer not found"))?;

        if !ctx.is_staff() && Some(client.company_id) != ctx.principal.company_id {
            return Err(AppError::authorization(
                "Client does not belong to your company.",
            ));
        }

        self.customers.soft_delete(id).await?;

        info!(customer_id = %id, deleted_by = %ctx.principal.id, "Customer deleted");
        Ok(())
    }
}
