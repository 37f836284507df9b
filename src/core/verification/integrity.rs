//! Reference and identifier integrity checks for collection Bundles

use crate::core::bundle::full_url;
use crate::core::verification::report::{VerificationFailure, VerificationReport};
use crate::domain::{split_reference, ResourceType};
use serde_json::Value;
use std::collections::HashSet;

/// Reference-bearing properties checked on every resource
const REFERENCE_FIELDS: &[&str] = &["subject", "specimen"];

/// Verifies a Bundle produced by the converter
///
/// Checks every entry for a non-empty `resourceType` and `id`, a `fullUrl`
/// matching `urn:uuid:<id>`, and an id not used by an earlier entry. Every
/// `subject`/`specimen` reference must name a resource in the same Bundle
/// and every Observation must carry a non-empty `gene` component.
///
/// # Examples
///
/// ```
/// use pgx_fhir::core::verification::verify_bundle;
/// use serde_json::json;
///
/// let bundle = json!({
///     "resourceType": "Bundle",
///     "type": "collection",
///     "entry": [{"fullUrl": "urn:uuid:P1", "resource": {"resourceType": "Patient", "id": "P1"}}]
/// });
/// assert!(verify_bundle(&bundle).is_success());
/// ```
pub fn verify_bundle(bundle: &Value) -> VerificationReport {
    let mut report =
        VerificationReport::new(bundle.get("id").and_then(Value::as_str).map(str::to_string));

    if bundle.get("resourceType").and_then(Value::as_str) != Some(ResourceType::Bundle.as_str()) {
        report.record_bundle_failure(VerificationFailure::bundle("resourceType is not Bundle"));
    }
    if bundle.get("type").and_then(Value::as_str) != Some("collection") {
        report.record_bundle_failure(VerificationFailure::bundle("type is not collection"));
    }

    let Some(entries) = bundle.get("entry").and_then(Value::as_array) else {
        report.record_bundle_failure(VerificationFailure::bundle("entry is not an array"));
        return report;
    };

    let targets: HashSet<(&str, &str)> = entries
        .iter()
        .filter_map(|entry| {
            let resource = entry.get("resource")?;
            Some((
                resource.get("resourceType")?.as_str()?,
                resource.get("id")?.as_str()?,
            ))
        })
        .collect();

    let mut seen_ids = HashSet::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let failures = check_entry(index, entry, &targets, &mut seen_ids);
        if failures.is_empty() {
            report.record_pass();
        } else {
            report.record_failures(failures);
        }
    }

    if report.is_success() {
        tracing::debug!(entries = report.total_entries, "Bundle verification passed");
    } else {
        tracing::warn!(
            entries = report.total_entries,
            failures = report.failures.len(),
            "Bundle verification failed"
        );
    }

    report
}

fn check_entry<'b>(
    index: usize,
    entry: &'b Value,
    targets: &HashSet<(&str, &str)>,
    seen_ids: &mut HashSet<&'b str>,
) -> Vec<VerificationFailure> {
    let Some(resource) = entry.get("resource").filter(|r| r.is_object()) else {
        return vec![VerificationFailure::entry(index, None, "entry has no resource object")];
    };

    let id = non_empty_str(resource, "id");
    let mut failures = Vec::new();
    let mut fail = |reason: String| failures.push(VerificationFailure::entry(index, id, reason));

    let resource_type = non_empty_str(resource, "resourceType");
    if resource_type.is_none() {
        fail("resourceType is missing or empty".to_string());
    }

    match id {
        Some(id) => {
            let expected = full_url(id);
            match entry.get("fullUrl").and_then(Value::as_str) {
                Some(url) if url == expected => {}
                Some(url) => fail(format!("fullUrl {url} does not match {expected}")),
                None => fail("fullUrl is missing".to_string()),
            }
            if !seen_ids.insert(id) {
                fail(format!("id {id} is used by an earlier entry"));
            }
        }
        None => fail("id is missing or empty".to_string()),
    }

    for field in REFERENCE_FIELDS {
        let Some(reference) = resource.get(*field).map(|r| r.get("reference")) else {
            continue;
        };
        match reference.and_then(Value::as_str).and_then(split_reference) {
            Some(target) if targets.contains(&target) => {}
            Some(_) => fail(format!(
                "{field} reference {} does not resolve within the bundle",
                reference.and_then(Value::as_str).unwrap_or_default()
            )),
            None => fail(format!("{field} reference is malformed")),
        }
    }

    if resource_type == Some(ResourceType::Observation.as_str()) && !has_gene_component(resource) {
        fail("observation has no gene component".to_string());
    }

    failures
}

fn non_empty_str<'v>(value: &'v Value, key: &str) -> Option<&'v str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn has_gene_component(observation: &Value) -> bool {
    observation
        .get("component")
        .and_then(Value::as_array)
        .is_some_and(|components| {
            components.iter().any(|c| {
                c["code"]["text"] == "gene"
                    && c.get("valueString")
                        .and_then(Value::as_str)
                        .is_some_and(|gene| !gene.trim().is_empty())
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::adapter::{ConversionOptions, GeneCall, PgxBundleRequest};
    use crate::core::context::BuildContext;
    use serde_json::json;

    fn converted() -> Value {
        PgxBundleRequest::new(vec![GeneCall::new("CYP2C19"), GeneCall::new("CYP2D6")])
            .with_patient_id("P1")
            .with_specimen_id("S1")
            .build(&ConversionOptions::default(), &BuildContext::system())
            .unwrap()
    }

    fn reasons(report: &VerificationReport) -> Vec<&str> {
        report.failures.iter().map(|f| f.reason.as_str()).collect()
    }

    #[test]
    fn test_converted_bundle_passes() {
        let report = verify_bundle(&converted());
        assert!(report.is_success(), "{}", report.format_summary());
        assert_eq!(report.total_entries, 4);
        assert_eq!(report.passed, 4);
    }

    #[test]
    fn test_broken_reference_is_flagged() {
        let mut bundle = converted();
        bundle["entry"][2]["resource"]["subject"]["reference"] = json!("Patient/P9");

        let report = verify_bundle(&bundle);
        assert_eq!(report.failed, 1);
        assert_eq!(report.failures[0].entry_index, Some(2));
        assert!(reasons(&report)[0].contains("Patient/P9"));
    }

    #[test]
    fn test_reference_to_wrong_type_is_flagged() {
        let mut bundle = converted();
        bundle["entry"][2]["resource"]["specimen"]["reference"] = json!("Patient/S1");
        assert!(!verify_bundle(&bundle).is_success());
    }

    #[test]
    fn test_full_url_mismatch_is_flagged() {
        let mut bundle = converted();
        bundle["entry"][0]["fullUrl"] = json!("urn:uuid:other");

        let report = verify_bundle(&bundle);
        assert_eq!(report.failures.len(), 1);
        assert!(reasons(&report)[0].starts_with("fullUrl urn:uuid:other"));
    }

    #[test]
    fn test_duplicate_id_is_flagged() {
        let mut bundle = converted();
        let first_obs_id = bundle["entry"][2]["resource"]["id"].clone();
        bundle["entry"][3]["resource"]["id"] = first_obs_id.clone();
        bundle["entry"][3]["fullUrl"] = json!(format!("urn:uuid:{}", first_obs_id.as_str().unwrap()));

        let report = verify_bundle(&bundle);
        assert_eq!(report.failed, 1);
        assert_eq!(report.failures[0].entry_index, Some(3));
        assert!(reasons(&report)[0].contains("earlier entry"));
    }

    #[test]
    fn test_observation_without_gene_is_flagged() {
        let mut bundle = converted();
        bundle["entry"][3]["resource"]["component"] = json!([]);
        let report = verify_bundle(&bundle);
        assert_eq!(reasons(&report), vec!["observation has no gene component"]);
    }

    #[test]
    fn test_bundle_level_checks() {
        let report = verify_bundle(&json!({"resourceType": "Patient", "type": "document"}));
        assert_eq!(
            reasons(&report),
            vec![
                "resourceType is not Bundle",
                "type is not collection",
                "entry is not an array"
            ]
        );
    }

    #[test]
    fn test_entry_without_resource() {
        let report = verify_bundle(&json!({
            "resourceType": "Bundle",
            "type": "collection",
            "entry": [{"fullUrl": "urn:uuid:x"}]
        }));
        assert_eq!(report.failed, 1);
        assert_eq!(reasons(&report), vec!["entry has no resource object"]);
    }
}
