//! Fare service: CLI server
//!
//! Headless fare estimation service, suitable for a systemd unit, a
//! container or a standalone process.
//!
//! ```sh
//! # Run with default config (~/.config/fare-service/config.toml)
//! fare-service
//!
//! # Custom config path
//! fare-service --config /etc/fare-service/config.toml
//!
//! # Keep rules in memory (development)
//! fare-service --memory --api-port 8080
//!
//! # Validate config without starting
//! fare-service --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use fare_service::config::{AppConfig, ConfigSource, StorageBackend};
use fare_service::server::{init_tracing, ServerHandle, ServerOptions};

/// Fare estimation service for ride-hailing trips.
#[derive(Parser, Debug)]
#[command(
    name = "fare-service",
    version,
    about = "Fare estimation against versioned pricing rules",
    long_about = "REST API server that estimates ride-hailing fares from a route \
                  and the newest pricing rule of a city and vehicle type.\n\n\
                  Default config: ~/.config/fare-service/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "FARE_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(long)]
    api_port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Keep pricing rules in memory instead of the database.
    #[arg(long)]
    memory: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .unwrap_or_else(fare_service::default_config_path);

    let loaded = AppConfig::load_or_default(&config_path);
    if cli.check {
        // Validation mode reports errors instead of falling back
        let (mut config, _) = loaded?;
        apply_overrides(&mut config, cli.api_port, cli.log_level.as_deref(), cli.memory);
        config.validate()?;
        println!("✅ Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.api_address());
        println!("   Storage     : {:?}", config.storage.backend);
        println!("   Database    : {}", config.database.url);
        println!("   Mapping     : {}", config.mapping.base_url);
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    let config = match loaded {
        Ok((mut cfg, source)) => {
            apply_overrides(&mut cfg, cli.api_port, cli.log_level.as_deref(), cli.memory);
            // Init tracing first so subsequent logs are formatted properly
            init_tracing(&cfg);
            match source {
                ConfigSource::File => {
                    info!("Configuration loaded from {}", config_path.display())
                }
                ConfigSource::Defaults => info!(
                    "No config file at {}, using default configuration",
                    config_path.display()
                ),
            }
            cfg
        }
        Err(e) => {
            let mut cfg = AppConfig::default();
            apply_overrides(&mut cfg, cli.api_port, cli.log_level.as_deref(), cli.memory);
            init_tracing(&cfg);
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
            cfg
        }
    };

    // Overrides were applied before tracing existed; report them now
    if let Some(port) = cli.api_port {
        info!("CLI override: api_port = {}", port);
    }
    if let Some(ref level) = cli.log_level {
        info!("CLI override: log_level = {}", level);
    }
    if cli.memory {
        info!("CLI override: storage.backend = memory");
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
    })
    .await?;

    handle.install_signal_handler();

    info!("🚀 Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}

fn apply_overrides(config: &mut AppConfig, api_port: Option<u16>, log_level: Option<&str>, memory: bool) {
    if let Some(port) = api_port {
        config.server.api_port = port;
    }
    if let Some(level) = log_level {
        config.logging.level = level.to_string();
    }
    if memory {
        config.storage.backend = StorageBackend::Memory;
    }
}
