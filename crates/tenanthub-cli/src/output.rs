//! Terminal output helpers.

use serde::Serialize;

use tenanthub_core::error::AppError;

/// Print a success line.
pub fn print_success(message: &str) {
    println!("✓ {message}");
}

/// Pretty-print a value as JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
