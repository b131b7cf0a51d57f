//! Dry-run the path guard against untrusted filenames.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use warden_core::error::AppError;
use warden_storage::{GuardError, PathGuard};

use crate::output::{self, OutputFormat};

/// Arguments for the check-path command
#[derive(Debug, Args)]
pub struct CheckPathArgs {
    /// Filenames to judge, exactly as a client would send them
    #[arg(required = true)]
    pub paths: Vec<String>,
}

/// One verdict row
#[derive(Debug, Serialize, Tabled)]
pub struct PathVerdict {
    /// Raw input
    input: String,
    /// allowed, validation_failed, traversal_detected or error
    verdict: String,
    /// Rule or reason
    detail: String,
    /// Sandbox-relative location when allowed
    resolved: String,
}

/// Judges one input.
pub fn judge(guard: &PathGuard, input: &str) -> PathVerdict {
    let (verdict, detail, resolved) = match guard.resolve(input) {
        Ok(path) => ("allowed", String::new(), path.relative),
        Err(GuardError::Validation(rule)) => {
            ("validation_failed", rule.as_str().to_string(), String::new())
        }
        Err(GuardError::TraversalDetected) => (
            "traversal_detected",
            "resolves outside the sandbox".to_string(),
            String::new(),
        ),
        Err(GuardError::Io(e)) => ("error", e.to_string(), String::new()),
    };

    PathVerdict {
        input: input.to_string(),
        verdict: verdict.to_string(),
        detail,
        resolved,
    }
}

/// Execute the check-path command
pub async fn execute(
    args: &CheckPathArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let guard = PathGuard::from_config(&config.sandbox)?;

    let rows: Vec<PathVerdict> = args.paths.iter().map(|p| judge(&guard, p)).collect();
    output::print_list(&rows, format);
    Ok(())
}
