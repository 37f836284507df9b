//! Configuration management for pgx-fhir.
//!
//! # Overview
//!
//! pgx-fhir reads an optional TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `PGX_FHIR_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`BundleConfig`] - Specimen type and category texts, output verification
//! - `naming` - Extra field-name candidates per logical field
//! - [`LoggingConfig`] - Local JSON log files
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [bundle]
//! default_specimen_type = "Blood specimen"
//! observation_category = "laboratory"
//! verify_output = true
//!
//! [naming]
//! given = ["given_name"]
//! family = ["family_name"]
//!
//! [logging]
//! local_enabled = false
//! local_path = "${HOME}/.local/state/pgx-fhir"
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pgx_fhir::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("pgx-fhir.toml")?;
//! println!("Category: {}", config.bundle.observation_category);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;

pub use loader::{load_config, parse_config};
pub use schema::{ApplicationConfig, BundleConfig, LoggingConfig, PgxFhirConfig};
