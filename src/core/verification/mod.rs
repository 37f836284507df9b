//! Bundle verification
//!
//! Re-checks a produced Bundle for id, `fullUrl` and reference integrity
//! before it leaves the process.

pub mod integrity;
pub mod report;

pub use integrity::verify_bundle;
pub use report::{VerificationFailure, VerificationReport};
