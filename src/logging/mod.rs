//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Human-readable console logs on stderr
//! - Configurable log levels
//! - Local JSON file logging with rotation
//!
//! Standard output is left to the converted Bundle.
//!
//! # Example
//!
//! ```no_run
//! use pgx_fhir::logging::init_logging;
//! use pgx_fhir::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a record conversion
///
/// # Example
///
/// ```no_run
/// use pgx_fhir::log_conversion_start;
///
/// log_conversion_start!(3, "0.1");
/// ```
#[macro_export]
macro_rules! log_conversion_start {
    ($results:expr, $ruleset_version:expr) => {
        tracing::info!(
            results = $results,
            ruleset_version = %$ruleset_version,
            "Starting PGx conversion"
        );
    };
}

/// Log the completion of a record conversion
///
/// # Example
///
/// ```no_run
/// use pgx_fhir::log_conversion_complete;
/// use std::time::Duration;
///
/// log_conversion_complete!(5, Duration::from_millis(3));
/// ```
#[macro_export]
macro_rules! log_conversion_complete {
    ($entries:expr, $duration:expr) => {
        tracing::info!(
            entries = $entries,
            duration_ms = $duration.as_millis() as u64,
            "PGx conversion completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use pgx_fhir::log_error_with_context;
/// use pgx_fhir::domain::PgxFhirError;
///
/// let error = PgxFhirError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

#[cfg(test)]
mod tests {
    use crate::domain::PgxFhirError;
    use std::time::Duration;

    #[test]
    fn test_macros_expand_without_subscriber() {
        crate::log_conversion_start!(2usize, "0.1");
        crate::log_conversion_complete!(4usize, Duration::from_millis(12));
        crate::log_error_with_context!(
            &PgxFhirError::Other("boom".to_string()),
            "while testing"
        );
    }
}
