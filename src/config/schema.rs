//! Configuration schema types

use crate::core::fields::LogicalField;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Main pgx-fhir configuration
///
/// Every section is optional in the TOML file and falls back to its defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PgxFhirConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Bundle output settings
    #[serde(default)]
    pub bundle: BundleConfig,

    /// Extra field-name candidates, keyed by logical field
    /// (`patient_id`, `given`, `family`, ...)
    #[serde(default)]
    pub naming: BTreeMap<String, Vec<String>>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PgxFhirConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.bundle.validate()?;
        validate_naming(&self.naming)?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Bundle output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleConfig {
    /// Specimen `type.text` when the record names no specimen type
    #[serde(default = "default_specimen_type")]
    pub default_specimen_type: String,

    /// Observation `category[0].text`
    #[serde(default = "default_observation_category")]
    pub observation_category: String,

    /// Re-check every produced Bundle before writing it
    #[serde(default = "default_true")]
    pub verify_output: bool,
}

impl BundleConfig {
    fn validate(&self) -> Result<(), String> {
        if self.default_specimen_type.trim().is_empty() {
            return Err("bundle.default_specimen_type cannot be empty".to_string());
        }
        if self.observation_category.trim().is_empty() {
            return Err("bundle.observation_category cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            default_specimen_type: default_specimen_type(),
            observation_category: default_observation_category(),
            verify_output: true,
        }
    }
}

fn validate_naming(naming: &BTreeMap<String, Vec<String>>) -> Result<(), String> {
    for (key, names) in naming {
        if key.parse::<LogicalField>().is_err() {
            return Err(format!(
                "Unknown naming field '{key}'. Must be one of: {}",
                LogicalField::ALL.map(|f| f.key()).join(", ")
            ));
        }
        if names.iter().any(|name| name.trim().is_empty()) {
            return Err(format!("naming.{key} contains an empty field name"));
        }
    }
    Ok(())
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for local log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_specimen_type() -> String {
    crate::core::adapter::DEFAULT_SPECIMEN_TYPE.to_string()
}

fn default_observation_category() -> String {
    crate::core::builders::DEFAULT_CATEGORY_TEXT.to_string()
}

fn default_local_path() -> String {
    "/var/log/pgx-fhir".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: PgxFhirConfig = toml::from_str("").unwrap();
        assert_eq!(config, PgxFhirConfig::default());
        assert_eq!(config.application.log_level, "info");
        assert_eq!(config.bundle.default_specimen_type, "Blood specimen");
        assert_eq!(config.bundle.observation_category, "laboratory");
        assert!(config.bundle.verify_output);
        assert!(!config.logging.local_enabled);
        assert_eq!(config.logging.local_path, "/var/log/pgx-fhir");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = PgxFhirConfig::default();
        config.application.log_level = "verbose".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.contains("Invalid log_level 'verbose'"));
    }

    #[test]
    fn test_empty_bundle_texts_rejected() {
        let mut config = PgxFhirConfig::default();
        config.bundle.observation_category = " ".to_string();
        assert!(config.validate().is_err());

        let mut config = PgxFhirConfig::default();
        config.bundle.default_specimen_type = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_naming_keys_are_checked() {
        let mut config = PgxFhirConfig::default();
        config
            .naming
            .insert("given".to_string(), vec!["given_name".to_string()]);
        assert!(config.validate().is_ok());

        config
            .naming
            .insert("nickname".to_string(), vec!["apodo".to_string()]);
        let err = config.validate().unwrap_err();
        assert!(err.contains("Unknown naming field 'nickname'"));
    }

    #[test]
    fn test_naming_rejects_blank_names() {
        let mut config = PgxFhirConfig::default();
        config.naming.insert("gene".to_string(), vec![String::new()]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_rotation() {
        let config: PgxFhirConfig = toml::from_str(
            r#"
[logging]
local_rotation = "size"
"#,
        )
        .unwrap();
        assert!(config.validate().unwrap_err().contains("local_rotation"));
    }
}
