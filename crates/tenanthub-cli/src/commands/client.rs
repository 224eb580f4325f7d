//! Client directory commands.

use clap::{Args, Subcommand};

use tenanthub_core::error::AppError;
use tenanthub_core::types::ClientId;
use tenanthub_entity::client::{ContactDetails, CreateClient};

use crate::output;

use super::App;

/// Arguments for client commands.
#[derive(Debug, Args)]
pub struct ClientArgs {
    /// Acting principal's username.
    #[arg(long = "as")]
    pub acting_as: String,

    /// Client subcommand.
    #[command(subcommand)]
    pub command: ClientCommand,
}

/// Client subcommands.
#[derive(Debug, Subcommand)]
pub enum ClientCommand {
    /// Create a client in the acting principal's company.
    Create {
        /// Client display name.
        name: String,
        /// Account reference number.
        #[arg(long)]
        account_number: String,
        /// Contact email.
        #[arg(long)]
        email: String,
        /// Mobile phone number.
        #[arg(long)]
        mobile_number: Option<String>,
    },
    /// List visible clients.
    List,
    /// Soft-delete a client and its customers.
    Delete {
        /// Client id.
        id: ClientId,
    },
}

/// Execute client commands.
pub async fn execute(app: &App, args: &ClientArgs) -> Result<(), AppError> {
    let ctx = app.acting_context(&args.acting_as).await?;

    match &args.command {
        ClientCommand::Create {
            name,
            account_number,
            email,
            mobile_number,
        } => {
            let client = app
                .clients
                .create_client(
                    &ctx,
                    CreateClient {
                        name: name.clone(),
                        contact: ContactDetails {
                            account_number: account_number.clone(),
                            email: email.clone(),
                            mobile_number: mobile_number.clone(),
                            ..Default::default()
                        },
                    },
                )
                .await?;

            output::print_success(&format!("Created client '{}' ({})", client.name, client.id));
        }
        ClientCommand::List => {
            let clients = app.clients.list_clients(&ctx).await?;
            output::print_json(&clients)?;
        }
        ClientCommand::Delete { id } => {
            app.clients.delete_client(&ctx, *id).await?;
            output::print_success(&format!("Deleted client {id}"));
        }
    }

    Ok(())
}
