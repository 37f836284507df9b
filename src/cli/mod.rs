//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for pgx-fhir using clap.

pub mod commands;

use crate::config::{load_config, parse_config, PgxFhirConfig};
use crate::domain::{PgxFhirError, Result};
use clap::{Parser, Subcommand};
use std::path::Path;

/// Configuration file read when `--config` is not given and the file exists
pub const DEFAULT_CONFIG_PATH: &str = "pgx-fhir.toml";

/// Process exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const CONFIGURATION: i32 = 2;
    pub const INVALID_INPUT: i32 = 3;
    pub const VERIFICATION_FAILED: i32 = 4;
    pub const FATAL: i32 = 5;
}

/// pgx-fhir - PGx results to FHIR Bundles
#[derive(Parser, Debug)]
#[command(name = "pgx-fhir")]
#[command(version, about, long_about = None)]
#[command(author = "PGx FHIR Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "PGX_FHIR_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "PGX_FHIR_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a synthetic PGx input JSON
    Demo(commands::demo::DemoArgs),

    /// Convert a PGx input JSON into a FHIR collection Bundle
    Convert(commands::convert::ConvertArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),
}

impl Commands {
    /// Whether the command runs with the loaded configuration
    pub fn needs_config(&self) -> bool {
        matches!(self, Self::Demo(_) | Self::Convert(_))
    }
}

/// Loads the effective configuration
///
/// An explicit path must exist. Without one, [`DEFAULT_CONFIG_PATH`] is read
/// when present; otherwise defaults apply, still subject to environment
/// overrides and validation.
///
/// # Errors
///
/// Returns a configuration error when loading or validation fails.
pub fn load_settings(path: Option<&str>) -> Result<PgxFhirConfig> {
    match path {
        Some(path) => load_config(path),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => load_config(DEFAULT_CONFIG_PATH),
        None => parse_config(""),
    }
}

/// Maps an error to the exit code reported for it
pub fn exit_code_for(error: &PgxFhirError) -> i32 {
    match error {
        PgxFhirError::Configuration(_) => exit_codes::CONFIGURATION,
        PgxFhirError::Validation(_) | PgxFhirError::Serialization(_) => exit_codes::INVALID_INPUT,
        PgxFhirError::Io(_) | PgxFhirError::Other(_) => exit_codes::FATAL,
    }
}
