//! Start the Warden server.

use clap::Args;

use warden_core::error::AppError;

use crate::output;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Disable background session cleanup (expired sessions are still
    /// rejected and purged on access)
    #[arg(long)]
    pub no_cleanup: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, config_path: &str) -> Result<(), AppError> {
    let mut config = super::load_config(config_path)?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if args.no_cleanup {
        config.session.cleanup_enabled = false;
    }

    println!("Starting Warden server...");
    output::print_kv("Address", &config.server.bind_address());
    output::print_kv("Sandbox", &config.sandbox.base_dir);
    output::print_kv("Session TTL", &format!("{} min", config.session.ttl_minutes));
    if !config.session.cookie_secure {
        output::print_warning("Session cookie is not marked Secure; use for local plaintext testing only");
    }

    warden_api::run_server(config).await
}
