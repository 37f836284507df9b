//! Verification report structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of verifying one Bundle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    /// When the verification was performed
    pub verified_at: DateTime<Utc>,

    /// Id of the verified Bundle, if it had one
    pub bundle_id: Option<String>,

    /// Number of entries checked
    pub total_entries: usize,

    /// Entries without any finding
    pub passed: usize,

    /// Entries with at least one finding
    pub failed: usize,

    /// Every finding, in entry order
    pub failures: Vec<VerificationFailure>,
}

/// A single integrity finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationFailure {
    /// Position of the entry in `Bundle.entry`, `None` for bundle-level findings
    pub entry_index: Option<usize>,

    /// Resource id of the entry, when it has one
    pub resource_id: Option<String>,

    pub reason: String,
}

impl VerificationFailure {
    pub fn bundle(reason: impl Into<String>) -> Self {
        Self {
            entry_index: None,
            resource_id: None,
            reason: reason.into(),
        }
    }

    pub fn entry(index: usize, resource_id: Option<&str>, reason: impl Into<String>) -> Self {
        Self {
            entry_index: Some(index),
            resource_id: resource_id.map(str::to_string),
            reason: reason.into(),
        }
    }
}

impl VerificationReport {
    pub fn new(bundle_id: Option<String>) -> Self {
        Self {
            verified_at: Utc::now(),
            bundle_id,
            total_entries: 0,
            passed: 0,
            failed: 0,
            failures: Vec::new(),
        }
    }

    /// Records an entry with no findings
    pub fn record_pass(&mut self) {
        self.total_entries += 1;
        self.passed += 1;
    }

    /// Records an entry together with its findings
    pub fn record_failures(&mut self, failures: Vec<VerificationFailure>) {
        self.total_entries += 1;
        self.failed += 1;
        self.failures.extend(failures);
    }

    /// Records a finding about the Bundle itself
    pub fn record_bundle_failure(&mut self, failure: VerificationFailure) {
        self.failures.push(failure);
    }

    /// Whether the Bundle passed every check
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Human-readable summary
    pub fn format_summary(&self) -> String {
        let mut summary = String::new();
        summary.push_str("Bundle verification\n");
        summary.push_str(&format!(
            "  Bundle: {}\n",
            self.bundle_id.as_deref().unwrap_or("<none>")
        ));
        summary.push_str(&format!("  Verified at: {}\n", self.verified_at));
        summary.push_str(&format!("  Entries: {}\n", self.total_entries));
        summary.push_str(&format!("  Passed: {}\n", self.passed));
        summary.push_str(&format!("  Failed: {}\n", self.failed));

        if !self.failures.is_empty() {
            summary.push_str("\nFailures:\n");
            for (i, failure) in self.failures.iter().enumerate() {
                let location = match (failure.entry_index, failure.resource_id.as_deref()) {
                    (Some(index), Some(id)) => format!("entry {index} ({id})"),
                    (Some(index), None) => format!("entry {index}"),
                    (None, _) => "bundle".to_string(),
                };
                summary.push_str(&format!("  {}. {}: {}\n", i + 1, location, failure.reason));
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_report_is_success() {
        let report = VerificationReport::new(Some("B1".to_string()));
        assert_eq!(report.total_entries, 0);
        assert!(report.failures.is_empty());
        assert!(report.is_success());
    }

    #[test]
    fn test_record_pass_and_failure() {
        let mut report = VerificationReport::new(None);
        report.record_pass();
        report.record_failures(vec![
            VerificationFailure::entry(1, Some("S1"), "fullUrl mismatch"),
            VerificationFailure::entry(1, Some("S1"), "unresolved reference"),
        ]);

        assert_eq!(report.total_entries, 2);
        assert_eq!(report.passed, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.failures.len(), 2);
        assert!(!report.is_success());
    }

    #[test]
    fn test_bundle_failure_does_not_count_as_entry() {
        let mut report = VerificationReport::new(None);
        report.record_bundle_failure(VerificationFailure::bundle("type is not collection"));
        assert_eq!(report.total_entries, 0);
        assert!(!report.is_success());
    }

    #[test]
    fn test_format_summary() {
        let mut report = VerificationReport::new(Some("B1".to_string()));
        report.record_pass();
        report.record_failures(vec![VerificationFailure::entry(
            1,
            Some("S1"),
            "subject reference Patient/P9 does not resolve",
        )]);

        let summary = report.format_summary();
        assert!(summary.contains("Bundle: B1"));
        assert!(summary.contains("Entries: 2"));
        assert!(summary.contains("Passed: 1"));
        assert!(summary.contains("Failed: 1"));
        assert!(summary.contains("1. entry 1 (S1): subject reference Patient/P9 does not resolve"));
    }
}
