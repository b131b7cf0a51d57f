//! Password hashing for seed configuration.

use clap::Args;

use warden_auth::PasswordHasher;
use warden_core::error::AppError;

use crate::output;

/// Arguments for the hash-password command
#[derive(Debug, Args)]
pub struct HashArgs {
    /// Password to hash. Prompted for when omitted.
    pub password: Option<String>,
}

/// Execute the hash-password command
pub async fn execute(args: &HashArgs, config_path: &str) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let hasher = PasswordHasher::new(&config.auth)?;

    let password = match &args.password {
        Some(p) => {
            output::print_warning("Passwords given as arguments end up in shell history");
            p.clone()
        }
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
    };

    let hash = tokio::task::spawn_blocking(move || hasher.hash_password(&password))
        .await
        .map_err(|e| AppError::internal(format!("Hashing task failed: {e}")))??;

    println!("{hash}");
    Ok(())
}
