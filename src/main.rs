// Artex - Incremental per-group PNG export for multi-artboard documents
// Copyright (c) 2025 Artex Contributors
// Licensed under the MIT License

use artex::cli::commands::{EXIT_CONFIG, EXIT_FATAL};
use artex::cli::{Cli, Commands};
use artex::config::{load_config_or_default, ArtexConfig, LoggingConfig};
use artex::logging::init_logging;
use clap::Parser;
use std::process;

fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // A broken config is reported by the command that needs it, so logging
    // falls back to defaults here.
    let config = load_config_or_default(&cli.config);
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| config.as_ref().ok().map(|c| c.application.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());
    let logging_config = config
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_else(|_| LoggingConfig::default());

    let logging_guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(EXIT_FATAL);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Artex - Incremental per-group PNG export"
    );

    let exit_code = match execute_command(&cli, config) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            EXIT_FATAL
        }
    };

    // process::exit skips destructors, so flush the file writer first
    drop(logging_guard);
    process::exit(exit_code);
}

/// Execute the CLI command
fn execute_command(cli: &Cli, config: artex::domain::Result<ArtexConfig>) -> anyhow::Result<i32> {
    let loaded = || match &config {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::error!(error = %e, config_path = %cli.config, "Failed to load configuration");
            eprintln!("❌ {e}");
            None
        }
    };

    match &cli.command {
        Commands::Export(args) => match loaded() {
            Some(config) => args.execute(config),
            None => Ok(EXIT_CONFIG),
        },
        Commands::Inspect(args) => match loaded() {
            Some(config) => args.execute(config),
            None => Ok(EXIT_CONFIG),
        },
        Commands::ValidateConfig(args) => args.execute(&cli.config),
        Commands::Init(args) => args.execute(),
    }
}
