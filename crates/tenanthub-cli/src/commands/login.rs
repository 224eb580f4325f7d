//! Verify credentials and print a token.

use clap::Args;

use tenanthub_core::error::AppError;

use crate::output;

use super::App;

/// Arguments for `tenanthub login`.
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}

/// Execute the login command.
pub async fn execute(app: &App, args: &LoginArgs) -> Result<(), AppError> {
    let outcome = app.auth.login(&args.username, &args.password).await?;

    output::print_json(&serde_json::json!({
        "token": outcome.token.token,
        "expires_at": outcome.token.expires_at,
        "username": outcome.principal.username,
        "roles": outcome.principal.roles,
        "company": outcome.principal.company_id,
    }))
}
