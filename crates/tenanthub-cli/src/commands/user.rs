//! Account provisioning commands.

use clap::{Args, Subcommand};

use tenanthub_core::error::AppError;
use tenanthub_core::types::CompanyId;
use tenanthub_entity::principal::AccountRole;
use tenanthub_service::CreateAccountRequest;

use crate::output;

use super::App;

/// Arguments for user commands.
#[derive(Debug, Args)]
pub struct UserArgs {
    /// Acting principal's username.
    #[arg(long = "as")]
    pub acting_as: String,

    /// User subcommand.
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands.
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Create an account through the provisioning engine.
    Create {
        /// Username of the new account.
        username: String,
        /// Email of the new account.
        email: String,
        /// Password of the new account.
        password: String,
        /// Role slug (e.g. "customer-user").
        role: AccountRole,
        /// Target company id (omit for staff accounts).
        #[arg(long)]
        company: Option<String>,
    },
    /// List the accounts of a company.
    List {
        /// Company id.
        company: CompanyId,
    },
    /// Soft-delete an account.
    Delete {
        /// Username of the account to delete.
        username: String,
    },
}

/// Execute user commands.
pub async fn execute(app: &App, args: &UserArgs) -> Result<(), AppError> {
    let ctx = app.acting_context(&args.acting_as).await?;

    match &args.command {
        UserCommand::Create {
            username,
            email,
            password,
            role,
            company,
        } => {
            let principal = app
                .provisioning
                .create_account(
                    &ctx,
                    CreateAccountRequest {
                        username: username.clone(),
                        email: email.clone(),
                        password: password.clone(),
                        role: *role,
                        company: company.clone(),
                    },
                )
                .await?;

            output::print_success(&format!(
                "Created '{}' ({}) with role {}",
                principal.username, principal.id, role
            ));
        }
        UserCommand::List { company } => {
            let principals = app.principals.list_by_company(*company).await?;
            output::print_json(&principals)?;
        }
        UserCommand::Delete { username } => {
            // Company principals may only delete inside their own company.
            let target = app
                .principals
                .find_by_username(username)
                .await?
                .ok_or_else(|| AppError::not_found(format!("User '{username}' not found")))?;

            if !ctx.is_staff() && target.company_id != ctx.principal.company_id {
                return Err(AppError::authorization(
                    "You cannot delete a user that is not in your company.",
                ));
            }

            app.principals.soft_delete(target.id).await?;
            output::print_success(&format!("Deleted '{username}'"));
        }
    }

    Ok(())
}
