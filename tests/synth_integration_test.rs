//! Synthetic input through the full conversion pipeline

use pgx_fhir::core::adapter::{from_pgx_record, PgxBundleConverter};
use pgx_fhir::core::context::BuildContext;
use pgx_fhir::core::fields::{LogicalField, NamingConventions};
use pgx_fhir::core::verification::verify_bundle;
use pgx_fhir::domain::{PgxInput, PgxRecord};
use pgx_fhir::synth::{make_synthetic_input, write_input_json};
use serde_json::Value;
use tempfile::TempDir;

#[test]
fn test_write_input_json_creates_parents() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("a").join("b").join("input.json");

    let written = write_input_json(&path, 7).unwrap();
    assert_eq!(written, path);

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.ends_with("}\n"));
    assert!(text.contains("\n  \"patient\": {"));

    let input: PgxInput = serde_json::from_str(&text).unwrap();
    assert_eq!(input.results.len(), 3);
    assert_eq!(input.specimen.patient_id, input.patient.patient_id);
}

#[test]
fn test_same_seed_same_people() {
    let a = make_synthetic_input(11);
    let b = make_synthetic_input(11);
    assert_eq!(a.patient, b.patient);
    assert_eq!(a.specimen.specimen_id, b.specimen.specimen_id);
    assert_eq!(a.results, b.results);
}

#[test]
fn test_synthetic_file_converts() {
    let dir = TempDir::new().unwrap();
    let path = write_input_json(dir.path().join("input.json"), 7).unwrap();

    let record = PgxRecord::from_json(&std::fs::read_to_string(path).unwrap()).unwrap();
    let bundle = from_pgx_record(&record).unwrap();

    assert!(verify_bundle(&bundle).is_success());
    let entries = bundle["entry"].as_array().unwrap();
    assert_eq!(entries.len(), 5);

    let patient = &entries[0]["resource"];
    assert!(patient["id"].as_str().unwrap().starts_with('P'));
    assert_eq!(patient["gender"], "female");
    assert_eq!(patient["birthDate"], "1991-10-09");
    // given_name/family_name are not in the built-in table
    assert!(patient.get("name").is_none());

    let specimen = &entries[1]["resource"];
    assert!(["blood", "saliva"].contains(&specimen["type"]["text"].as_str().unwrap()));

    let serialized = bundle.to_string();
    assert!(!serialized.contains("activity_score"));
}

#[test]
fn test_typed_names_resolve_with_extra_conventions() {
    let input = make_synthetic_input(3);
    let record = PgxRecord::try_from(&input).unwrap();

    let naming = NamingConventions::new()
        .with_extra(LogicalField::GivenName, ["given_name"])
        .with_extra(LogicalField::FamilyName, ["family_name"]);
    let bundle = PgxBundleConverter::new()
        .with_naming(naming)
        .convert(&record, &BuildContext::system())
        .unwrap();

    let name: &Value = &bundle["entry"][0]["resource"]["name"][0];
    assert_eq!(name["given"][0], input.patient.given_name.as_str());
    assert_eq!(name["family"], input.patient.family_name.as_str());
}
