//! Lineseek HTTP server entry point
//!
//! Discovers the indexes under the data root and serves the search
//! API.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lineseek::core::config::Config;
use lineseek::core::services::Services;
use lineseek::http;

#[derive(Parser, Debug)]
#[command(name = "lineseek", version, about = "Multi-index full-text search service")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, env = "LINESEEK_CONFIG")]
    config: Option<PathBuf>,

    /// Bind host, overrides the config file
    #[arg(long)]
    host: Option<String>,

    /// Bind port, overrides the config file
    #[arg(long)]
    port: Option<u16>,

    /// Directory whose subdirectories are the indexes
    #[arg(long)]
    data_root: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lineseek=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting lineseek search service");
    tracing::info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();

    // Load configuration, then apply CLI overrides
    let mut config = match &cli.config {
        Some(path) => {
            let mut config = Config::from_file(path)?;
            config.merge_env();
            config
        }
        None => Config::load()?,
    };
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(data_root) = cli.data_root {
        config.storage.data_root = data_root;
    }
    config.validate()?;
    config.log_config();

    // Discovery runs here, before any request handling begins
    let services = Arc::new(Services::new(config.clone())?);
    tracing::info!(
        "Serving {} indexes ({} skipped)",
        services.registry.len(),
        services.registry.skipped().len()
    );

    let app = http::router(Arc::clone(&services));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
