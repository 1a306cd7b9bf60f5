//! Domu Backend: service entry point.
//!
//! Parses command line arguments, builds the application through the
//! factory (settings, logging, routes) and serves it until shutdown.

use std::path::PathBuf;

use clap::Parser;

use domu_backend::config::{DEFAULT_ENV_FILE, DEFAULT_HOST, DEFAULT_PORT};
use domu_backend::http::start_server;
use domu_backend::{create_app, AppError, AppOptions, SettingsLoader};

/// Domu Backend: HTTP API service
#[derive(Parser, Debug)]
#[command(name = "domu-backend", version, about)]
struct Args {
    /// Path to an optional env file with settings
    #[arg(short, long, default_value = DEFAULT_ENV_FILE)]
    env_file: PathBuf,

    /// Address to listen on
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Log level filter (e.g., "domu_backend=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    let loader = SettingsLoader::new(&args.env_file);
    let options = AppOptions {
        log_filter: args.log_level,
    };

    let app = create_app(&loader, &options)?;

    if let Err(e) = start_server(app, &args.host, args.port).await {
        tracing::error!(error = %e, "Server failed");
        return Err(e.into());
    }

    Ok(())
}
