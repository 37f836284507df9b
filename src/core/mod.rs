//! Core conversion logic
//!
//! # Modules
//!
//! - [`ids`] - Resource identifier generation
//! - [`clock`] - Time source and instant formatting
//! - [`context`] - Clock and id generator handed to every builder
//! - [`fields`] - Multilingual field-name resolution
//! - [`builders`] - Patient, Specimen and Observation documents
//! - [`bundle`] - Collection Bundle assembly
//! - [`adapter`] - PGx record to Bundle conversion
//! - [`verification`] - Post-conversion integrity checks
//!
//! # Conversion Workflow
//!
//! 1. **Resolve**: read patient, specimen and result fields under their
//!    English or Spanish names
//! 2. **Build**: produce one Patient, one Specimen and one Observation per
//!    gene result, all cross-referenced by id
//! 3. **Assemble**: wrap the resources into a `collection` Bundle
//! 4. **Verify** (optional): re-check ids, `fullUrl`s and references
//!
//! # Example
//!
//! ```rust
//! use pgx_fhir::core::adapter::from_pgx_record;
//! use pgx_fhir::core::verification::verify_bundle;
//! use pgx_fhir::domain::PgxRecord;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let record = PgxRecord::from_json(r#"{
//!     "patient": {"id": "P1", "sex": "female"},
//!     "specimen": {"id": "S1", "type_text": "blood"},
//!     "results": [{"gene": "CYP2C19", "diplotype": "*1/*2"}]
//! }"#)?;
//!
//! let bundle = from_pgx_record(&record)?;
//! assert!(verify_bundle(&bundle).is_success());
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod builders;
pub mod bundle;
pub mod clock;
pub mod context;
pub mod fields;
pub mod ids;
pub mod verification;
