//! CLI command definitions and dispatch.

pub mod check_path;
pub mod config;
pub mod hash;
pub mod sample;
pub mod serve;

use clap::{Parser, Subcommand};

use warden_core::config::AppConfig;
use warden_core::error::AppError;

use crate::output::OutputFormat;

/// Warden: session lifecycle and sandboxed file access server
#[derive(Debug, Parser)]
#[command(name = "warden", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the Warden server
    Serve(serve::ServeArgs),
    /// Write the sample files into the sandbox
    SetupSample,
    /// Produce an Argon2id hash for a seed user's `password_hash`
    HashPassword(hash::HashArgs),
    /// Show how the path guard judges untrusted filenames
    CheckPath(check_path::CheckPathArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Default log filter when `RUST_LOG` is unset.
    pub fn default_log_level(&self) -> &'static str {
        match self.command {
            Commands::Serve(_) => "info",
            _ => "warn",
        }
    }

    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, &self.config).await,
            Commands::SetupSample => sample::execute(&self.config).await,
            Commands::HashPassword(args) => hash::execute(args, &self.config).await,
            Commands::CheckPath(args) => check_path::execute(args, &self.config, self.format).await,
            Commands::Config(args) => config::execute(args, &self.config, self.format).await,
        }
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(config_path)
}
