//! User Service — CLI server
//!
//! ```sh
//! # Run with default config (~/.config/user-service/config.toml)
//! user-service
//!
//! # Custom config path and port
//! user-service --config /etc/user-service/config.toml --port 8080
//!
//! # Validate config without starting
//! user-service --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use user_service::config::{default_config_path, AppConfig, CONFIG_ENV_VAR};
use user_service::server::{init_tracing, run};

/// REST service for managing users and roles.
#[derive(Parser, Debug)]
#[command(name = "user-service", version, about)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(default_config_path);

    // A missing file means "run on defaults"; any other failure is an error.
    let mut file_missing = false;
    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) if e.is_missing_file() => {
            file_missing = true;
            (AppConfig::default(), None)
        }
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        if let Some(e) = load_error {
            eprintln!("Configuration is invalid: {}", e);
            return Err(e.into());
        }
        println!("Configuration is valid");
        if file_missing {
            println!("   Config file : {} (not found, defaults in use)", config_path.display());
        } else {
            println!("   Config file : {}", config_path.display());
        }
        println!("   API address : {}", config.server.address());
        println!("   Storage     : {:?}", config.storage.backend);
        println!("   Database    : {}", config.storage.database().url);
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    init_tracing(&config);
    match load_error {
        None if file_missing => info!(
            "No configuration at {}, using defaults",
            config_path.display()
        ),
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => error!("{}. Using default configuration.", e),
    }

    run(config).await
}
