//! Validate config command implementation

use crate::cli::{exit_code_for, exit_codes, load_settings, DEFAULT_CONFIG_PATH};
use crate::core::fields::{LogicalField, NamingConventions};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        let shown = config_path.unwrap_or(DEFAULT_CONFIG_PATH);
        tracing::info!(config_path = %shown, "Validating configuration");

        println!("🔍 Validating configuration file: {shown}");
        println!();

        let config = match load_settings(config_path) {
            Ok(config) => config,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        let naming = match NamingConventions::from_config(&config.naming) {
            Ok(naming) => naming,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(exit_codes::CONFIGURATION);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Default Specimen Type: {}", config.bundle.default_specimen_type);
        println!("  Observation Category: {}", config.bundle.observation_category);
        println!("  Verify Output: {}", config.bundle.verify_output);
        for field in LogicalField::ALL {
            if config.naming.contains_key(field.key()) {
                println!("  Naming [{}]: {}", field, naming.candidates(field).join(", "));
            }
        }
        println!(
            "  File Logging: {}",
            if config.logging.local_enabled {
                format!("{} ({})", config.logging.local_path, config.logging.local_rotation)
            } else {
                "disabled".to_string()
            }
        );
        println!();

        Ok(exit_codes::SUCCESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_valid_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[naming]\ngene = [\"locus\"]").unwrap();

        let code = ValidateArgs {}
            .execute(file.path().to_str())
            .await
            .unwrap();
        assert_eq!(code, exit_codes::SUCCESS);
    }

    #[tokio::test]
    async fn test_invalid_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[application]\nlog_level = \"loud\"").unwrap();

        let code = ValidateArgs {}
            .execute(file.path().to_str())
            .await
            .unwrap();
        assert_eq!(code, exit_codes::CONFIGURATION);
    }
}
