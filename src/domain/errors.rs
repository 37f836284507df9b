//! Domain error types
//!
//! This module defines the error hierarchy for pgx-fhir. All errors are
//! domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main pgx-fhir error type
///
/// This is the primary error type used throughout the library.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum PgxFhirError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Input record validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Errors raised while turning a PGx record into a Bundle
///
/// A conversion that fails with one of these never yields a partial Bundle.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A gene result had no resolvable, non-blank gene value
    #[error("Result record {index} missing gene (tried: {})", candidates.join("/"))]
    MissingGene {
        /// Zero-based position of the offending result
        index: usize,
        /// Field names that were tried, in order
        candidates: Vec<String>,
    },

    /// The input is not shaped like a PGx record
    #[error("Invalid PGx record: {0}")]
    InvalidRecord(String),
}

impl ValidationError {
    /// Position of the offending result, when the error concerns one
    pub fn result_index(&self) -> Option<usize> {
        match self {
            Self::MissingGene { index, .. } => Some(*index),
            Self::InvalidRecord(_) => None,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for PgxFhirError {
    fn from(err: std::io::Error) -> Self {
        PgxFhirError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for PgxFhirError {
    fn from(err: serde_json::Error) -> Self {
        PgxFhirError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for PgxFhirError {
    fn from(err: toml::de::Error) -> Self {
        PgxFhirError::Configuration(format!("TOML parse error: {err}"))
    }
}
