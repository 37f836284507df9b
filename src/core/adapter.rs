//! PGx record to FHIR Bundle conversion
//!
//! The adapter is the single integration point for callers holding a
//! [`PgxRecord`]. Conversion runs in two stages:
//!
//! 1. **Resolve**: field names are resolved against the naming conventions
//!    into a canonical [`PgxBundleRequest`]. A result without a gene fails
//!    here.
//! 2. **Build**: the request is turned into Patient, Specimen and one
//!    Observation per result, all referencing the same patient/specimen
//!    ids, and assembled into a `collection` Bundle.
//!
//! Callers that already hold canonical fields can build a
//! [`PgxBundleRequest`] directly and skip the first stage.

use crate::config::{BundleConfig, PgxFhirConfig};
use crate::core::builders::{
    build_observation_pgx, build_patient, build_specimen, present, ObservationFields,
    PatientFields, SpecimenFields, DEFAULT_CATEGORY_TEXT,
};
use crate::core::bundle::assemble_collection;
use crate::core::context::BuildContext;
use crate::core::fields::{LogicalField, NamingConventions};
use crate::domain::{PgxRecord, ResourceType, Result, ValidationError};
use serde_json::Value;
use std::time::Instant;

/// Specimen `type.text` when the record names no specimen type
pub const DEFAULT_SPECIMEN_TYPE: &str = "Blood specimen";

/// One gene result in canonical form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneCall {
    pub gene: String,
    pub diplotype: Option<String>,
    pub phenotype: Option<String>,
}

impl GeneCall {
    pub fn new(gene: impl Into<String>) -> Self {
        Self {
            gene: gene.into(),
            diplotype: None,
            phenotype: None,
        }
    }

    pub fn with_diplotype(mut self, diplotype: impl Into<String>) -> Self {
        self.diplotype = Some(diplotype.into());
        self
    }

    pub fn with_phenotype(mut self, phenotype: impl Into<String>) -> Self {
        self.phenotype = Some(phenotype.into());
        self
    }
}

/// Settings that shape the produced documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOptions {
    /// Specimen `type.text` used when the request has none
    pub default_specimen_type: String,

    /// Observation `category[0].text`
    pub observation_category: String,

    /// Fixed Bundle id; a `bundle-<hex>` id is generated when unset
    pub bundle_id: Option<String>,
}

impl ConversionOptions {
    /// Sets a fixed Bundle id
    pub fn with_bundle_id(mut self, bundle_id: impl Into<String>) -> Self {
        self.bundle_id = Some(bundle_id.into());
        self
    }
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            default_specimen_type: DEFAULT_SPECIMEN_TYPE.to_string(),
            observation_category: DEFAULT_CATEGORY_TEXT.to_string(),
            bundle_id: None,
        }
    }
}

impl From<&BundleConfig> for ConversionOptions {
    fn from(config: &BundleConfig) -> Self {
        Self {
            default_specimen_type: config.default_specimen_type.clone(),
            observation_category: config.observation_category.clone(),
            bundle_id: None,
        }
    }
}

/// Canonical input of a minimal PGx Bundle
///
/// Missing patient/specimen ids are generated at build time.
///
/// # Examples
///
/// ```
/// use pgx_fhir::core::adapter::{ConversionOptions, GeneCall, PgxBundleRequest};
/// use pgx_fhir::core::context::BuildContext;
///
/// # fn example() -> pgx_fhir::domain::Result<()> {
/// let bundle = PgxBundleRequest::new(vec![GeneCall::new("CYP2C19").with_diplotype("*1/*2")])
///     .with_patient_id("P1")
///     .with_specimen_id("S1")
///     .build(&ConversionOptions::default(), &BuildContext::system())?;
///
/// assert_eq!(bundle["entry"].as_array().unwrap().len(), 3);
/// assert_eq!(bundle["entry"][1]["resource"]["subject"]["reference"], "Patient/P1");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PgxBundleRequest {
    pub patient_id: Option<String>,
    pub specimen_id: Option<String>,
    pub given: Option<String>,
    pub family: Option<String>,
    pub birth_date: Option<String>,
    pub sex: Option<String>,
    pub specimen_type_text: Option<String>,
    pub results: Vec<GeneCall>,
}

impl PgxBundleRequest {
    pub fn new(results: Vec<GeneCall>) -> Self {
        Self {
            results,
            ..Self::default()
        }
    }

    pub fn with_patient_id(mut self, patient_id: impl Into<String>) -> Self {
        self.patient_id = Some(patient_id.into());
        self
    }

    pub fn with_specimen_id(mut self, specimen_id: impl Into<String>) -> Self {
        self.specimen_id = Some(specimen_id.into());
        self
    }

    pub fn with_given(mut self, given: impl Into<String>) -> Self {
        self.given = Some(given.into());
        self
    }

    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = Some(family.into());
        self
    }

    pub fn with_birth_date(mut self, birth_date: impl Into<String>) -> Self {
        self.birth_date = Some(birth_date.into());
        self
    }

    pub fn with_sex(mut self, sex: impl Into<String>) -> Self {
        self.sex = Some(sex.into());
        self
    }

    pub fn with_specimen_type_text(mut self, type_text: impl Into<String>) -> Self {
        self.specimen_type_text = Some(type_text.into());
        self
    }

    /// Builds the Bundle: Patient, Specimen, then one Observation per result
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingGene`] if any result has a blank
    /// gene. Nothing is built in that case.
    pub fn build(&self, options: &ConversionOptions, ctx: &BuildContext<'_>) -> Result<Value> {
        if let Some(index) = self.results.iter().position(|r| r.gene.trim().is_empty()) {
            return Err(ValidationError::MissingGene {
                index,
                candidates: vec!["gene".to_string()],
            }
            .into());
        }

        let patient_id = present(&self.patient_id)
            .map(str::to_string)
            .unwrap_or_else(|| ctx.new_id(ResourceType::Patient.id_prefix()));
        let specimen_id = present(&self.specimen_id)
            .map(str::to_string)
            .unwrap_or_else(|| ctx.new_id(ResourceType::Specimen.id_prefix()));

        let patient_ref = ResourceType::Patient.reference(&patient_id);
        let specimen_ref = ResourceType::Specimen.reference(&specimen_id);

        let patient = build_patient(&PatientFields {
            id: patient_id.clone(),
            given: self.given.clone(),
            family: self.family.clone(),
            birth_date: self.birth_date.clone(),
            sex: self.sex.clone(),
        });

        let type_text = present(&self.specimen_type_text)
            .unwrap_or(&options.default_specimen_type)
            .to_string();
        let specimen = build_specimen(
            &SpecimenFields::new(specimen_id.clone(), patient_ref.clone()).with_type_text(type_text),
        );

        let issued = ctx.now();
        let mut resources = Vec::with_capacity(self.results.len() + 2);
        resources.push(patient);
        resources.push(specimen);
        for call in &self.results {
            let fields = ObservationFields {
                id: ctx.new_id(ResourceType::Observation.id_prefix()),
                patient_ref: patient_ref.clone(),
                specimen_ref: Some(specimen_ref.clone()),
                gene: call.gene.clone(),
                diplotype: call.diplotype.clone(),
                phenotype: call.phenotype.clone(),
                issued: Some(issued),
                category_text: options.observation_category.clone(),
            };
            resources.push(build_observation_pgx(&fields, ctx));
        }

        tracing::debug!(
            patient_id = %patient_id,
            specimen_id = %specimen_id,
            observations = self.results.len(),
            "Built PGx resources"
        );

        Ok(assemble_collection(
            &resources,
            options.bundle_id.as_deref(),
            ctx,
        ))
    }
}

/// Converts PGx records into Bundles
///
/// # Examples
///
/// ```
/// use pgx_fhir::core::adapter::PgxBundleConverter;
/// use pgx_fhir::core::context::BuildContext;
/// use pgx_fhir::domain::PgxRecord;
///
/// # fn example() -> pgx_fhir::domain::Result<()> {
/// let record = PgxRecord::from_json(r#"{
///     "patient": {"patient_id": "P1", "nombre": "Ana", "sexo": "female"},
///     "specimen": {"specimen_id": "S1", "tipo": "saliva"},
///     "results": [{"gen": "CYP2D6", "diplotipo": "*1/*4", "fenotipo": "intermediate metabolizer"}]
/// }"#)?;
///
/// let bundle = PgxBundleConverter::new().convert(&record, &BuildContext::system())?;
/// assert_eq!(bundle["entry"][0]["resource"]["gender"], "female");
/// assert_eq!(bundle["entry"][1]["resource"]["type"]["text"], "saliva");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct PgxBundleConverter {
    naming: NamingConventions,
    options: ConversionOptions,
}

impl PgxBundleConverter {
    /// Converter with the built-in naming table and default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Converter configured from the `[bundle]` and `[naming]` sections
    ///
    /// # Errors
    ///
    /// Returns a configuration error for unknown `[naming]` keys.
    pub fn from_config(config: &PgxFhirConfig) -> Result<Self> {
        let naming = NamingConventions::from_config(&config.naming)?;
        if naming.has_extras() {
            tracing::debug!(fields = config.naming.len(), "Using extra naming conventions");
        }
        Ok(Self::new()
            .with_naming(naming)
            .with_options(ConversionOptions::from(&config.bundle)))
    }

    /// Replaces the naming conventions
    pub fn with_naming(mut self, naming: NamingConventions) -> Self {
        self.naming = naming;
        self
    }

    /// Replaces the conversion options
    pub fn with_options(mut self, options: ConversionOptions) -> Self {
        self.options = options;
        self
    }

    /// The naming conventions in use
    pub fn naming(&self) -> &NamingConventions {
        &self.naming
    }

    /// The conversion options in use
    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Resolves a record into its canonical request
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingGene`] for the first result whose
    /// gene is absent or blank under every candidate name.
    pub fn resolve(&self, record: &PgxRecord) -> Result<PgxBundleRequest> {
        let naming = &self.naming;
        let patient = Some(&record.patient);
        let specimen = Some(&record.specimen);

        let patient_id = naming.resolve_text(patient, LogicalField::PatientId);
        let specimen_id = naming.resolve_text(specimen, LogicalField::SpecimenId);

        if let (Some(expected), Some(linked)) = (
            patient_id.as_deref(),
            record.specimen.get("patient_id").and_then(Value::as_str),
        ) {
            if expected != linked {
                tracing::warn!(
                    patient_id = %expected,
                    specimen_patient_id = %linked,
                    "Specimen names a different patient; referencing the resolved patient id"
                );
            }
        }

        let results = record
            .results
            .iter()
            .enumerate()
            .map(|(index, result)| -> Result<GeneCall> {
                let gene = naming
                    .resolve_text(Some(result), LogicalField::Gene)
                    .filter(|gene| !gene.trim().is_empty())
                    .ok_or_else(|| ValidationError::MissingGene {
                        index,
                        candidates: naming
                            .candidates(LogicalField::Gene)
                            .into_iter()
                            .map(str::to_string)
                            .collect(),
                    })?;

                Ok(GeneCall {
                    gene,
                    diplotype: naming.resolve_text(Some(result), LogicalField::Diplotype),
                    phenotype: naming.resolve_text(Some(result), LogicalField::Phenotype),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(PgxBundleRequest {
            patient_id,
            specimen_id,
            given: naming.resolve_text(patient, LogicalField::GivenName),
            family: naming.resolve_text(patient, LogicalField::FamilyName),
            birth_date: naming.resolve_text(patient, LogicalField::BirthDate),
            sex: naming.resolve_text(patient, LogicalField::Sex),
            specimen_type_text: naming.resolve_text(specimen, LogicalField::SpecimenType),
            results,
        })
    }

    /// Converts one record into one Bundle
    ///
    /// # Errors
    ///
    /// Fails with a validation error when a result has no gene; no partial
    /// Bundle is returned.
    pub fn convert(&self, record: &PgxRecord, ctx: &BuildContext<'_>) -> Result<Value> {
        let start = Instant::now();
        crate::log_conversion_start!(record.results.len(), record.ruleset_version);

        let request = match self.resolve(record) {
            Ok(request) => request,
            Err(e) => {
                crate::log_error_with_context!(&e, "Failed to resolve PGx record");
                return Err(e);
            }
        };

        let bundle = request.build(&self.options, ctx)?;
        let entries = bundle["entry"].as_array().map_or(0, Vec::len);
        crate::log_conversion_complete!(entries, start.elapsed());

        Ok(bundle)
    }
}

/// Converts a PGx record with the built-in naming table, the system clock
/// and random identifiers
///
/// # Errors
///
/// Fails with [`ValidationError::MissingGene`] when a result has no gene.
pub fn from_pgx_record(record: &PgxRecord) -> Result<Value> {
    PgxBundleConverter::new().convert(record, &BuildContext::system())
}
