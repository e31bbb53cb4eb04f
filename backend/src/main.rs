// BioIndex Server entrypoint
//!
//! Initialization, middleware wiring, and graceful shutdown live in
//! dedicated modules so this file remains a thin orchestrator.

use anyhow::Result;
use bioindex_configs::ServerConfig;
use bioindex_server::lifecycle::{bootstrap, run};
use bioindex_server::logging;
use clap::Parser;
use log::info;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "bioindex-server", version, about = "BioIndex HTTP query server")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,
}

#[actix_web::main]
async fn main() -> Result<()> {
    let main_start = Instant::now();
    let args = Args::parse();

    let config = match ServerConfig::from_file(&args.config) {
        Ok(cfg) => {
            eprintln!(
                "Loaded config from: {}",
                std::fs::canonicalize(&args.config)
                    .unwrap_or_else(|_| args.config.clone())
                    .display()
            );
            cfg
        }
        Err(e) => {
            eprintln!("FATAL: Failed to load {}: {}", args.config.display(), e);
            eprintln!("Server cannot start without valid configuration");
            std::process::exit(1);
        }
    };

    // Logging before any other side effects
    let log_file = logging::init_logging(&config.logging)?;

    info!("BioIndex Server v{}", env!("CARGO_PKG_VERSION"));
    info!("Host: {}  Port: {}", config.server.host, config.server.port);
    info!("Logging to {}", log_file.display());

    let app_context = bootstrap(&config).await?;

    // Run HTTP server until termination signal is received
    run(&config, app_context, main_start).await
}
