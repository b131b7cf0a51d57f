//! Seed the sandbox with sample files.

use warden_core::error::AppError;
use warden_storage::SandboxReader;
use warden_storage::sample::setup_sample;

use crate::output;

/// Execute the setup-sample command
pub async fn execute(config_path: &str) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let reader = SandboxReader::from_config(&config.sandbox)?;

    let written = setup_sample(&reader).await?;

    output::print_success(&format!(
        "Sample files written to '{}'",
        reader.guard().base().display()
    ));
    for path in written {
        println!("  {path}");
    }
    Ok(())
}
