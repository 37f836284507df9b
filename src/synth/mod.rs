//! Seeded synthetic PGx input
//!
//! Produces a plausible, fully typed [`PgxInput`] for demos and tests. The
//! same seed always yields the same patient, specimen and results; only the
//! collection date follows the calendar.

use crate::domain::{
    GeneResultRecord, PatientRecord, PgxInput, Result, Sex, SpecimenRecord, SpecimenType,
};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::{Path, PathBuf};

/// Seed used when the caller gives none
pub const DEFAULT_SEED: u64 = 7;

const GIVEN_NAMES: &[&str] = &["Maria", "Sofia", "Valentina", "Camila", "Daniela"];
const FAMILY_NAMES: &[&str] = &["Perez", "Gonzalez", "Rojas", "Soto", "Torres"];
const SPECIMEN_TYPES: &[SpecimenType] = &[SpecimenType::Blood, SpecimenType::Saliva];

fn birth_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1991, 10, 9).unwrap_or_default()
}

/// Synthetic input collected today
pub fn make_synthetic_input(seed: u64) -> PgxInput {
    make_synthetic_input_on(seed, chrono::Local::now().date_naive())
}

/// Synthetic input with an explicit collection date
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use pgx_fhir::synth::make_synthetic_input_on;
///
/// let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let input = make_synthetic_input_on(7, day);
/// assert_eq!(input.specimen.patient_id, input.patient.patient_id);
/// assert_eq!(input.results.len(), 3);
/// ```
pub fn make_synthetic_input_on(seed: u64, collected_on: NaiveDate) -> PgxInput {
    let mut rng = StdRng::seed_from_u64(seed);

    let patient = PatientRecord {
        patient_id: format!("P{}", rng.gen_range(1000..=9999)),
        given_name: pick(&mut rng, GIVEN_NAMES).to_string(),
        family_name: pick(&mut rng, FAMILY_NAMES).to_string(),
        birth_date: birth_date(),
        sex: Sex::Female,
    };

    let specimen = SpecimenRecord {
        specimen_id: format!("S{}", rng.gen_range(1000..=9999)),
        patient_id: patient.patient_id.clone(),
        specimen_type: *pick(&mut rng, SPECIMEN_TYPES),
        collected_on,
    };

    let results = vec![
        GeneResultRecord::new("CYP2C19", "*1/*2", "intermediate metabolizer"),
        GeneResultRecord::new("CYP2D6", "*1/*4", "intermediate metabolizer")
            .with_activity_score(1.0),
        GeneResultRecord::new("SLCO1B1", "*1/*5", "decreased function"),
    ];

    PgxInput {
        patient,
        specimen,
        results,
        ruleset_version: "0.1".to_string(),
    }
}

fn pick<'a, T>(rng: &mut StdRng, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

/// Writes synthetic input as pretty JSON, creating parent directories
///
/// Returns the written path.
///
/// # Errors
///
/// Fails when the directory or file cannot be written.
pub fn write_input_json(path: impl AsRef<Path>, seed: u64) -> Result<PathBuf> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let input = make_synthetic_input(seed);
    let mut text = serde_json::to_string_pretty(&input)?;
    text.push('\n');
    fs::write(path, text)?;

    tracing::info!(
        path = %path.display(),
        seed,
        patient_id = %input.patient.patient_id,
        "Wrote synthetic PGx input"
    );

    Ok(path.to_path_buf())
}
