//! Customer directory commands.

use clap::{Args, Subcommand};

use tenanthub_core::error::AppError;
use tenanthub_core::types::{ClientId, CustomerId};
use tenanthub_entity::client::ContactDetails;
use tenanthub_entity::customer::CreateCustomer;

use crate::output;

use super::App;

/// Arguments for customer commands.
#[derive(Debug, Args)]
pub struct CustomerArgs {
    /// Acting principal's username.
    #[arg(long = "as")]
    pub acting_as: String,

    /// Customer subcommand.
    #[command(subcommand)]
    pub command: CustomerCommand,
}

/// Customer subcommands.
#[derive(Debug, Subcommand)]
pub enum CustomerCommand {
    /// Create a customer under one of the company's clients.
    Create {
        /// Owning client id.
        client: ClientId,
        /// Customer display name.
        name: String,
        /// Account reference number.
        #[arg(long)]
        account_number: String,
        /// Contact email.
        #[arg(long)]
        email: String,
    },
    /// List the customers of a client.
    List {
        /// Client id.
        client: ClientId,
    },
    /// Soft-delete a customer.
    Delete {
        /// Customer id.
        id: CustomerId,
    },
}

/// Execute customer commands.
pub async fn execute(app: &App, args: &CustomerArgs) -> Result<(), AppError> {
    let ctx = app.acting_context(&args.acting_as).await?;

    match &args.command {
        CustomerCommand::Create {
            client,
            name,
            account_number,
            email,
        } => {
            let customer = app
                .customers
                .create_customer(
                    &ctx,
                    CreateCustomer {
                        client_id: *client,
                        name: name.clone(),
                        contact: ContactDetails {
                            account_number: account_number.clone(),
                            email: email.clone(),
                            ..Default::default()
                        },
                    },
                )
                .await?;

            output::print_success(&format!(
                "Created customer '{}' ({})",
                customer.name, customer.id
            ));
        }
        CustomerCommand::List { client } => {
            let customers = app.customers.list_customers(&ctx, *client).await?;
            output::print_json(&customers)?;
        }
        CustomerCommand::Delete { id } => {
            app.customers.delete_customer(&ctx, *id).await?;
            output::print_success(&format!("Deleted customer {id}"));
        }
    }

    Ok(())
}
