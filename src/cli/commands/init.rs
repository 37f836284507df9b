//! Init command implementation
//!
//! Writes a commented sample configuration file.

use crate::cli::{exit_codes, DEFAULT_CONFIG_PATH};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing pgx-fhir configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(exit_codes::CONFIGURATION);
        }

        match fs::write(&self.output, Self::sample_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Validate configuration: pgx-fhir --config {} validate-config", self.output);
                println!("  3. Generate a sample record: pgx-fhir demo input.json");
                println!("  4. Convert it: pgx-fhir --config {} convert input.json", self.output);
                println!();
                Ok(exit_codes::SUCCESS)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(exit_codes::FATAL)
            }
        }
    }

    /// Sample configuration with every setting at its default
    pub(crate) fn sample_config() -> &'static str {
        r#"# pgx-fhir Configuration File
# Pharmacogenomics records to minimal FHIR collection Bundles
#
# Values may reference environment variables as ${VAR_NAME}.
# Any key can also be overridden with PGX_FHIR_<SECTION>_<KEY>.

[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

[bundle]
# Specimen type.text when the record names no specimen type
default_specimen_type = "Blood specimen"

# Observation category text
observation_category = "laboratory"

# Re-check ids, fullUrls and references before writing a Bundle
verify_output = true

# Extra field names tried after the built-in English/Spanish names.
# Keys: patient_id, given, family, birth_date, sex, specimen_id,
#       specimen_type, gene, diplotype, phenotype
[naming]
given = ["given_name"]
family = ["family_name"]

[logging]
# JSON log files next to the console output
local_enabled = false
local_path = "/var/log/pgx-fhir"

# Rotation (daily, hourly, never)
local_rotation = "daily"
"#
    }
}
