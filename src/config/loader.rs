//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::PgxFhirConfig;
use crate::domain::errors::PgxFhirError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Prefix of environment variables that override configuration values
pub const ENV_PREFIX: &str = "PGX_FHIR";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into PgxFhirConfig
/// 4. Applies environment variable overrides (PGX_FHIR_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns a configuration error if the file cannot be read, a referenced
/// environment variable is unset, the TOML is malformed or validation fails.
///
/// # Examples
///
/// ```no_run
/// use pgx_fhir::config::loader::load_config;
///
/// let config = load_config("pgx-fhir.toml").expect("Failed to load config");
/// println!("{}", config.bundle.default_specimen_type);
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<PgxFhirConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(PgxFhirError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        PgxFhirError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let config = parse_config(&contents)?;
    tracing::debug!(path = %path.display(), "Loaded configuration");
    Ok(config)
}

/// Parses configuration text, applying substitution, overrides and validation
///
/// # Errors
///
/// See [`load_config`].
pub fn parse_config(contents: &str) -> Result<PgxFhirConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: PgxFhirConfig = toml::from_str(&contents)
        .map_err(|e| PgxFhirError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        PgxFhirError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched. Every missing variable is reported in
/// one error.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| PgxFhirError::Other(format!("Invalid substitution pattern: {}", e)))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed = re.replace_all(line, |caps: &regex::Captures<'_>| {
            let name = &caps[1];
            std::env::var(name).unwrap_or_else(|_| {
                if !missing_vars.iter().any(|m| m == name) {
                    missing_vars.push(name.to_string());
                }
                caps[0].to_string()
            })
        });
        result.push_str(&processed);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(PgxFhirError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn env_var(section: &str, key: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}_{section}_{key}")).ok()
}

fn env_flag(section: &str, key: &str) -> Option<bool> {
    let raw = env_var(section, key)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => {
            tracing::warn!(
                variable = %format!("{ENV_PREFIX}_{section}_{key}"),
                value = %raw,
                "Ignoring non-boolean environment override"
            );
            None
        }
    }
}

/// Applies environment variable overrides using the PGX_FHIR_* prefix
///
/// Variables follow the pattern `PGX_FHIR_<SECTION>_<KEY>`, for example
/// `PGX_FHIR_APPLICATION_LOG_LEVEL` or `PGX_FHIR_BUNDLE_VERIFY_OUTPUT`.
fn apply_env_overrides(config: &mut PgxFhirConfig) {
    if let Some(val) = env_var("APPLICATION", "LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Some(val) = env_var("BUNDLE", "DEFAULT_SPECIMEN_TYPE") {
        config.bundle.default_specimen_type = val;
    }
    if let Some(val) = env_var("BUNDLE", "OBSERVATION_CATEGORY") {
        config.bundle.observation_category = val;
    }
    if let Some(val) = env_flag("BUNDLE", "VERIFY_OUTPUT") {
        config.bundle.verify_output = val;
    }

    if let Some(val) = env_flag("LOGGING", "LOCAL_ENABLED") {
        config.logging.local_enabled = val;
    }
    if let Some(val) = env_var("LOGGING", "LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Some(val) = env_var("LOGGING", "LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }
}
