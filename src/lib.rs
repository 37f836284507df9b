// pgx-fhir - Pharmacogenomics records to FHIR Bundles
// Copyright (c) 2025 PGx FHIR Contributors
// Licensed under the MIT License

//! # pgx-fhir - Pharmacogenomics records to FHIR
//!
//! pgx-fhir turns one pharmacogenomics (PGx) record (a patient, a specimen
//! and a list of gene results) into a minimal FHIR R4 `collection` Bundle.
//!
//! ## Overview
//!
//! This library provides:
//! - **Resolving** record fields written with English or Spanish names
//! - **Building** Patient, Specimen and one Observation per gene result
//! - **Assembling** the resources into a Bundle with consistent ids,
//!   `fullUrl`s and references
//! - **Verifying** produced Bundles for reference integrity
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Conversion logic (fields, builders, bundle, adapter, verification)
//! - [`domain`] - Input records, resource vocabulary, errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//! - [`synth`] - Seeded synthetic input
//!
//! ## Quick Start
//!
//! ```rust
//! use pgx_fhir::core::adapter::from_pgx_record;
//! use pgx_fhir::domain::PgxRecord;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let record = PgxRecord::from_json(r#"{
//!     "patient": {"id": "P1", "given": "Maria", "family": "Perez", "sex": "female"},
//!     "specimen": {"id": "S1", "type_text": "blood"},
//!     "results": [
//!         {"gene": "CYP2C19", "diplotype": "*1/*2", "phenotype": "intermediate metabolizer"},
//!         {"gen": "CYP2D6", "diplotipo": "*1/*4", "fenotipo": "intermediate metabolizer"}
//!     ]
//! }"#)?;
//!
//! let bundle = from_pgx_record(&record)?;
//! assert_eq!(bundle["type"], "collection");
//! assert_eq!(bundle["entry"].as_array().map(Vec::len), Some(4));
//! # Ok(())
//! # }
//! ```
//!
//! ## Deterministic Output
//!
//! Timestamps and generated ids come from a [`core::context::BuildContext`].
//! Tests pass a fixed clock and sequential ids:
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use pgx_fhir::core::adapter::PgxBundleConverter;
//! use pgx_fhir::core::clock::FixedClock;
//! use pgx_fhir::core::context::BuildContext;
//! use pgx_fhir::core::ids::SequentialIdGenerator;
//! use pgx_fhir::domain::PgxRecord;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let clock = FixedClock(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
//! let ids = SequentialIdGenerator::new();
//! let ctx = BuildContext::new(&clock, &ids);
//!
//! let record = PgxRecord::from_json(r#"{"patient": {}, "specimen": {}, "results": []}"#)?;
//! let bundle = PgxBundleConverter::new().convert(&record, &ctx)?;
//! assert_eq!(bundle["entry"][0]["resource"]["id"], "patient-000000000001");
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return [`domain::Result`], carrying a
//! [`domain::PgxFhirError`]. A result without a gene is a
//! [`domain::ValidationError::MissingGene`] and produces no Bundle.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
pub mod synth;
