//! Company provisioning commands.

use clap::{Args, Subcommand};

use tenanthub_core::error::AppError;
use tenanthub_core::types::CompanyId;
use tenanthub_service::CreateCompanyRequest;

use crate::output;

use super::App;

/// Arguments for company commands.
#[derive(Debug, Args)]
pub struct CompanyArgs {
    /// Acting principal's username.
    #[arg(long = "as")]
    pub acting_as: String,

    /// Company subcommand.
    #[command(subcommand)]
    pub command: CompanyCommand,
}

/// Company subcommands.
#[derive(Debug, Subcommand)]
pub enum CompanyCommand {
    /// Create a company together with its first super-user.
    Create {
        /// Company display name.
        name: String,
        /// Username of the company's first super-user.
        #[arg(long)]
        su_username: String,
        /// Email of the company's first super-user.
        #[arg(long)]
        su_email: String,
        /// Password of the company's first super-user.
        #[arg(long)]
        su_password: String,
    },
    /// Soft-delete a company.
    Delete {
        /// Company id.
        id: CompanyId,
    },
}

/// Execute company commands.
pub async fn execute(app: &App, args: &CompanyArgs) -> Result<(), AppError> {
    let ctx = app.acting_context(&args.acting_as).await?;

    match &args.command {
        CompanyCommand::Create {
            name,
            su_username,
            su_email,
            su_password,
        } => {
            let (company, super_user) = app
                .companies
                .create_company(
                    &ctx,
                    CreateCompanyRequest {
                        name: name.clone(),
                        super_user_username: su_username.clone(),
                        super_user_email: su_email.clone(),
                        super_user_password: su_password.clone(),
                    },
                )
                .await?;

            output::print_success(&format!(
                "Created company '{}' ({}) with super-user '{}'",
                company.name, company.id, super_user.username
            ));
        }
        CompanyCommand::Delete { id } => {
            app.companies.delete_company(&ctx, *id).await?;
            output::print_success(&format!("Deleted company {id}"));
        }
    }

    Ok(())
}
