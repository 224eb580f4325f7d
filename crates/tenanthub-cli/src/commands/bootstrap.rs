//! Bootstrap the first staff-admin account.

use clap::Args;

use tenanthub_core::error::AppError;
use tenanthub_entity::principal::{AccountRole, CreatePrincipal};

use crate::output;

use super::App;

/// Arguments for `tenanthub bootstrap`.
#[derive(Debug, Args)]
pub struct BootstrapArgs {
    /// Username of the first staff-admin.
    pub username: String,
    /// Email of the first staff-admin.
    pub email: String,
    /// Password of the first staff-admin.
    pub password: String,
}

/// Create the first staff-admin directly through the store.
///
/// The account carries the superuser flag so it can act before any role
/// edges have been exercised. Refused once any principal exists.
pub async fn execute(app: &App, args: &BootstrapArgs) -> Result<(), AppError> {
    if app
        .principals
        .find_by_username(&args.username)
        .await?
        .is_some()
    {
        return Err(AppError::conflict("User already exists."));
    }

    let create = CreatePrincipal {
        username: args.username.clone(),
        email: args.email.to_lowercase(),
        password_hash: app.hasher.hash_password(&args.password)?,
        role: AccountRole::StaffAdmin,
        is_superuser: true,
        company_id: None,
        created_by: None,
    };

    let principal = app.principals.insert(&create).await?;

    output::print_success(&format!(
        "Bootstrapped staff-admin '{}' ({})",
        principal.username, principal.id
    ));
    Ok(())
}
