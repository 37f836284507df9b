// pgx-fhir - Pharmacogenomics records to FHIR Bundles
// Copyright (c) 2025 PGx FHIR Contributors
// Licensed under the MIT License

use clap::Parser;
use pgx_fhir::cli::{exit_code_for, exit_codes, load_settings, Cli, Commands};
use pgx_fhir::config::{LoggingConfig, PgxFhirConfig};
use pgx_fhir::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let settings = if cli.command.needs_config() {
        Some(load_settings(cli.config.as_deref()))
    } else {
        None
    };

    let (log_level, logging_config) = match &settings {
        Some(Ok(config)) => (
            cli.log_level
                .clone()
                .unwrap_or_else(|| config.application.log_level.clone()),
            config.logging.clone(),
        ),
        _ => (
            cli.log_level.clone().unwrap_or_else(|| "info".to_string()),
            LoggingConfig::default(),
        ),
    };

    // process::exit skips destructors; the guard is dropped explicitly below
    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(exit_codes::FATAL);
        }
    };

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "pgx-fhir starting");

    let config = match settings {
        Some(Ok(config)) => config,
        Some(Err(e)) => {
            tracing::error!(error = %e, "Failed to load configuration");
            eprintln!("❌ Failed to load configuration");
            eprintln!("   Error: {e}");
            process::exit(exit_code_for(&e));
        }
        None => PgxFhirConfig::default(),
    };

    let exit_code = match execute_command(&cli, &config).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            exit_codes::FATAL
        }
    };

    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli, config: &PgxFhirConfig) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Demo(args) => args.execute().await,
        Commands::Convert(args) => args.execute(config).await,
        Commands::Init(args) => args.execute().await,
        Commands::ValidateConfig(args) => args.execute(cli.config.as_deref()).await,
    }
}
