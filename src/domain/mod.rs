//! Domain models and types for pgx-fhir.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Input records** ([`PgxRecord`], [`RecordSection`]) and the typed input
//!   schema ([`PgxInput`])
//! - **Resource vocabulary** ([`ResourceType`])
//! - **Error types** ([`PgxFhirError`], [`ValidationError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, PgxFhirError>`]:
//!
//! ```rust
//! use pgx_fhir::domain::{PgxRecord, Result};
//!
//! fn example() -> Result<()> {
//!     let record = PgxRecord::from_json(r#"{"patient": {}, "specimen": {}}"#)?;
//!     assert!(record.results.is_empty());
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod record;
pub mod resource;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{PgxFhirError, ValidationError};
pub use record::{
    GeneResultRecord, PatientRecord, PgxInput, PgxRecord, RecordSection, Sex, SpecimenRecord,
    SpecimenType,
};
pub use resource::{split_reference, ResourceType};
pub use result::Result;
