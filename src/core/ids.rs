//! Resource identifier generation
//!
//! Identifiers have the shape `<prefix>-<12 lowercase hex characters>`.
//! Production code draws the hex part from a fresh v4 UUID on every call, so
//! generators hold no shared state and need no coordination between threads.

use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Number of hex characters following the prefix
pub const ID_HEX_LEN: usize = 12;

/// Source of resource identifiers
pub trait IdGenerator: Send + Sync {
    /// Returns a new identifier starting with `prefix-`
    fn new_id(&self, prefix: &str) -> String;
}

/// Random identifiers backed by v4 UUIDs
///
/// Uniqueness is best-effort: 48 random bits per id, not a cryptographic
/// guarantee.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn new_id(&self, prefix: &str) -> String {
        let hex = Uuid::new_v4().simple().to_string();
        format!("{prefix}-{}", &hex[..ID_HEX_LEN])
    }
}

/// Deterministic identifiers for tests and reproducible output
///
/// Produces `<prefix>-000000000001`, `<prefix>-000000000002`, ... with a
/// single counter shared across prefixes.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    issued: AtomicU64,
}

impl SequentialIdGenerator {
    /// Creates a generator whose first id ends in `...001`
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator whose first id uses `start`
    pub fn starting_at(start: u64) -> Self {
        Self {
            issued: AtomicU64::new(start.saturating_sub(1)),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn new_id(&self, prefix: &str) -> String {
        let n = self.issued.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{prefix}-{n:0width$x}", width = ID_HEX_LEN)
    }
}

/// Generates a random identifier with the given prefix
///
/// # Examples
///
/// ```
/// use pgx_fhir::core::ids::new_id;
///
/// let id = new_id("patient");
/// assert!(id.starts_with("patient-"));
/// assert_eq!(id.len(), "patient-".len() + 12);
/// ```
pub fn new_id(prefix: &str) -> String {
    RandomIdGenerator.new_id(prefix)
}
