//! Field resolution across producer naming conventions
//!
//! Producers name the same logical field differently (`birth_date`, `dob`,
//! `fecha_nacimiento`, ...). Each logical field has an ordered list of
//! candidate names; the first candidate present on the source with a
//! non-null value wins. The built-in table is a versioned constant and is
//! never inferred at runtime. Callers may append extra candidates through
//! [`NamingConventions`], which never reorders the built-in ones.

use crate::domain::{PgxFhirError, RecordSection, Result};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// Version of the built-in candidate table
pub const NAMING_TABLE_VERSION: &str = "1";

pub const PATIENT_ID_CANDIDATES: &[&str] = &["id", "patient_id"];
pub const GIVEN_NAME_CANDIDATES: &[&str] = &[
    "given",
    "first_name",
    "firstname",
    "name",
    "nombres",
    "nombre",
];
pub const FAMILY_NAME_CANDIDATES: &[&str] = &[
    "family",
    "last_name",
    "lastname",
    "surname",
    "apellidos",
    "apellido",
];
pub const BIRTH_DATE_CANDIDATES: &[&str] = &[
    "birth_date",
    "birthdate",
    "date_of_birth",
    "dob",
    "fecha_nacimiento",
];
pub const SEX_CANDIDATES: &[&str] = &["sex", "gender", "sexo", "genero"];
pub const SPECIMEN_ID_CANDIDATES: &[&str] = &["id", "specimen_id"];
pub const SPECIMEN_TYPE_CANDIDATES: &[&str] = &["type_text", "specimen_type", "type", "tipo"];
pub const GENE_CANDIDATES: &[&str] = &["gene", "gen"];
pub const DIPLOTYPE_CANDIDATES: &[&str] = &["diplotype", "diplotipo"];
pub const PHENOTYPE_CANDIDATES: &[&str] = &["phenotype", "fenotipo"];

/// Anything that can look up an optional field by name
pub trait FieldSource {
    /// Returns the raw value stored under `name`, if the field exists
    fn field(&self, name: &str) -> Option<&Value>;
}

impl FieldSource for Map<String, Value> {
    fn field(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl FieldSource for Value {
    fn field(&self, name: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(name))
    }
}

impl FieldSource for RecordSection {
    fn field(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl<T: FieldSource + ?Sized> FieldSource for &T {
    fn field(&self, name: &str) -> Option<&Value> {
        (**self).field(name)
    }
}

/// Returns the first present, non-null value among `candidates`
///
/// An absent `source` resolves to `None`. The source is never modified.
///
/// # Examples
///
/// ```
/// use pgx_fhir::core::fields::resolve;
/// use serde_json::json;
///
/// let patient = json!({"dob": null, "fecha_nacimiento": "1991-10-09"});
/// let value = resolve(Some(&patient), &["birth_date", "dob", "fecha_nacimiento"]);
/// assert_eq!(value, Some(&json!("1991-10-09")));
/// assert_eq!(resolve::<serde_json::Value>(None, &["dob"]), None);
/// ```
pub fn resolve<'s, S>(source: Option<&'s S>, candidates: &[&str]) -> Option<&'s Value>
where
    S: FieldSource + ?Sized,
{
    find_field(source?, candidates.iter().copied()).map(|(_, value)| value)
}

/// Like [`resolve`], coercing the winning value to text
pub fn resolve_text<S>(source: Option<&S>, candidates: &[&str]) -> Option<String>
where
    S: FieldSource + ?Sized,
{
    let (name, value) = find_field(source?, candidates.iter().copied())?;
    Some(coerce_field(name, value))
}

fn find_field<'s, 'n, S>(
    source: &'s S,
    candidates: impl IntoIterator<Item = &'n str>,
) -> Option<(&'n str, &'s Value)>
where
    S: FieldSource + ?Sized,
{
    candidates.into_iter().find_map(|name| {
        source
            .field(name)
            .filter(|value| !value.is_null())
            .map(|value| (name, value))
    })
}

/// Coerces a resolved value to text
///
/// Strings are taken verbatim; numbers, booleans, arrays and objects become
/// their compact JSON text. No type checking is performed.
pub fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn coerce_field(name: &str, value: &Value) -> String {
    if !value.is_string() {
        tracing::debug!(
            field = name,
            kind = json_kind(value),
            "Coercing non-string field value to text"
        );
    }
    coerce_to_string(value)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Logical fields the converter resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LogicalField {
    PatientId,
    GivenName,
    FamilyName,
    BirthDate,
    Sex,
    SpecimenId,
    SpecimenType,
    Gene,
    Diplotype,
    Phenotype,
}

impl LogicalField {
    /// Every logical field, in table order
    pub const ALL: [LogicalField; 10] = [
        Self::PatientId,
        Self::GivenName,
        Self::FamilyName,
        Self::BirthDate,
        Self::Sex,
        Self::SpecimenId,
        Self::SpecimenType,
        Self::Gene,
        Self::Diplotype,
        Self::Phenotype,
    ];

    /// Key used for this field in configuration files
    pub fn key(&self) -> &'static str {
        match self {
            Self::PatientId => "patient_id",
            Self::GivenName => "given",
            Self::FamilyName => "family",
            Self::BirthDate => "birth_date",
            Self::Sex => "sex",
            Self::SpecimenId => "specimen_id",
            Self::SpecimenType => "specimen_type",
            Self::Gene => "gene",
            Self::Diplotype => "diplotype",
            Self::Phenotype => "phenotype",
        }
    }

    /// Built-in candidate names, in resolution order
    pub fn default_candidates(&self) -> &'static [&'static str] {
        match self {
            Self::PatientId => PATIENT_ID_CANDIDATES,
            Self::GivenName => GIVEN_NAME_CANDIDATES,
            Self::FamilyName => FAMILY_NAME_CANDIDATES,
            Self::BirthDate => BIRTH_DATE_CANDIDATES,
            Self::Sex => SEX_CANDIDATES,
            Self::SpecimenId => SPECIMEN_ID_CANDIDATES,
            Self::SpecimenType => SPECIMEN_TYPE_CANDIDATES,
            Self::Gene => GENE_CANDIDATES,
            Self::Diplotype => DIPLOTYPE_CANDIDATES,
            Self::Phenotype => PHENOTYPE_CANDIDATES,
        }
    }
}

impl fmt::Display for LogicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for LogicalField {
    type Err = PgxFhirError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| {
                PgxFhirError::Configuration(format!(
                    "Unknown naming field '{s}'. Must be one of: {}",
                    Self::ALL.map(|f| f.key()).join(", ")
                ))
            })
    }
}

/// Candidate names per logical field: the built-in table plus any extras
///
/// # Examples
///
/// ```
/// use pgx_fhir::core::fields::{LogicalField, NamingConventions};
/// use serde_json::json;
///
/// let naming = NamingConventions::new().with_extra(LogicalField::GivenName, ["given_name"]);
/// let patient = json!({"given_name": "Maria"});
///
/// assert_eq!(
///     naming.resolve_text(Some(&patient), LogicalField::GivenName),
///     Some("Maria".to_string())
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamingConventions {
    extra: HashMap<LogicalField, Vec<String>>,
}

impl NamingConventions {
    /// The built-in table with no extras
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends candidates for `field` after the existing ones
    ///
    /// Names already in the list are skipped.
    pub fn with_extra<I, N>(mut self, field: LogicalField, names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        for name in names {
            let name = name.into();
            let known = field.default_candidates().contains(&name.as_str())
                || self.extra.get(&field).is_some_and(|e| e.contains(&name));
            if !known && !name.is_empty() {
                self.extra.entry(field).or_default().push(name);
            }
        }
        self
    }

    /// Builds conventions from a `[naming]` configuration table
    ///
    /// # Errors
    ///
    /// Returns a configuration error for keys that are not logical fields.
    pub fn from_config(table: &BTreeMap<String, Vec<String>>) -> Result<Self> {
        table.iter().try_fold(Self::new(), |naming, (key, names)| {
            let field: LogicalField = key.parse()?;
            Ok(naming.with_extra(field, names.iter().cloned()))
        })
    }

    /// Candidate names for `field`, in resolution order
    pub fn candidates(&self, field: LogicalField) -> Vec<&str> {
        let mut names: Vec<&str> = field.default_candidates().to_vec();
        if let Some(extra) = self.extra.get(&field) {
            names.extend(extra.iter().map(String::as_str));
        }
        names
    }

    /// Resolves `field` on `source`
    pub fn resolve<'s, S>(&self, source: Option<&'s S>, field: LogicalField) -> Option<&'s Value>
    where
        S: FieldSource + ?Sized,
    {
        find_field(source?, self.candidates(field)).map(|(_, value)| value)
    }

    /// Resolves `field` on `source` and coerces it to text
    pub fn resolve_text<S>(&self, source: Option<&S>, field: LogicalField) -> Option<String>
    where
        S: FieldSource + ?Sized,
    {
        let (name, value) = find_field(source?, self.candidates(field))?;
        Some(coerce_field(name, value))
    }

    /// Whether any extra candidates were configured
    pub fn has_extras(&self) -> bool {
        !self.extra.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(LogicalField::PatientId, &["id", "patient_id"] ; "patient id")]
    #[test_case(LogicalField::GivenName, &["given", "first_name", "firstname", "name", "nombres", "nombre"] ; "given name")]
    #[test_case(LogicalField::FamilyName, &["family", "last_name", "lastname", "surname", "apellidos", "apellido"] ; "family name")]
    #[test_case(LogicalField::BirthDate, &["birth_date", "birthdate", "date_of_birth", "dob", "fecha_nacimiento"] ; "birth date")]
    #[test_case(LogicalField::Sex, &["sex", "gender", "sexo", "genero"] ; "sex")]
    #[test_case(LogicalField::SpecimenId, &["id", "specimen_id"] ; "specimen id")]
    #[test_case(LogicalField::SpecimenType, &["type_text", "specimen_type", "type", "tipo"] ; "specimen type")]
    #[test_case(LogicalField::Gene, &["gene", "gen"] ; "gene")]
    #[test_case(LogicalField::Diplotype, &["diplotype", "diplotipo"] ; "diplotype")]
    #[test_case(LogicalField::Phenotype, &["phenotype", "fenotipo"] ; "phenotype")]
    fn test_candidate_table(field: LogicalField, expected: &[&str]) {
        assert_eq!(field.default_candidates(), expected);
        assert_eq!(NamingConventions::new().candidates(field), expected.to_vec());
    }

    #[test_case(LogicalField::GivenName, "nombre", "Ana" ; "spanish given name")]
    #[test_case(LogicalField::FamilyName, "apellidos", "Soto Rojas" ; "spanish family name")]
    #[test_case(LogicalField::BirthDate, "dob", "1991-10-09" ; "dob")]
    #[test_case(LogicalField::Sex, "genero", "female" ; "spanish sex")]
    #[test_case(LogicalField::Gene, "gen", "CYP2D6" ; "spanish gene")]
    fn test_resolves_last_resort_names(field: LogicalField, name: &str, value: &str) {
        let source = json!({ name: value });
        assert_eq!(
            NamingConventions::new().resolve_text(Some(&source), field),
            Some(value.to_string())
        );
    }

    #[test]
    fn test_first_candidate_wins() {
        let source = json!({"nombre": "Ana", "given": "Maria", "first_name": "Sofia"});
        assert_eq!(
            resolve_text(Some(&source), GIVEN_NAME_CANDIDATES),
            Some("Maria".to_string())
        );
    }

    #[test]
    fn test_null_values_are_skipped() {
        let source = json!({"id": null, "patient_id": "P1"});
        assert_eq!(
            resolve(Some(&source), PATIENT_ID_CANDIDATES),
            Some(&json!("P1"))
        );
    }

    #[test]
    fn test_missing_everywhere_is_absent() {
        let source = json!({"unrelated": "x"});
        assert_eq!(resolve(Some(&source), GENE_CANDIDATES), None);
        assert_eq!(resolve::<Value>(None, GENE_CANDIDATES), None);
    }

    #[test]
    fn test_non_object_source_is_absent() {
        let source = json!(["gene", "CYP2D6"]);
        assert_eq!(resolve(Some(&source), GENE_CANDIDATES), None);
    }

    #[test]
    fn test_resolution_does_not_mutate_source() {
        let section = RecordSection::new().with("gen", "CYP2C9");
        let before = section.clone();
        let _ = resolve_text(Some(&section), GENE_CANDIDATES);
        assert_eq!(section, before);
    }

    #[test]
    fn test_coercion_to_string() {
        assert_eq!(coerce_to_string(&json!("x")), "x");
        assert_eq!(coerce_to_string(&json!(1.5)), "1.5");
        assert_eq!(coerce_to_string(&json!(42)), "42");
        assert_eq!(coerce_to_string(&json!(true)), "true");
        assert_eq!(coerce_to_string(&json!(["a", 1])), r#"["a",1]"#);
    }

    #[test]
    fn test_extra_candidates_are_appended() {
        let naming = NamingConventions::new()
            .with_extra(LogicalField::GivenName, ["given_name", "given", "given_name"]);
        let candidates = naming.candidates(LogicalField::GivenName);
        assert_eq!(candidates.first(), Some(&"given"));
        assert_eq!(candidates.last(), Some(&"given_name"));
        assert_eq!(candidates.len(), GIVEN_NAME_CANDIDATES.len() + 1);
        assert!(naming.has_extras());
    }

    #[test]
    fn test_builtin_candidates_outrank_extras() {
        let naming = NamingConventions::new().with_extra(LogicalField::Sex, ["sex_code"]);
        let source = json!({"sex_code": "F", "sexo": "female"});
        assert_eq!(
            naming.resolve_text(Some(&source), LogicalField::Sex),
            Some("female".to_string())
        );
    }

    #[test]
    fn test_from_config() {
        let mut table = BTreeMap::new();
        table.insert("family".to_string(), vec!["family_name".to_string()]);
        let naming = NamingConventions::from_config(&table).unwrap();
        assert!(naming
            .candidates(LogicalField::FamilyName)
            .contains(&"family_name"));
    }

    #[test]
    fn test_from_config_rejects_unknown_field() {
        let mut table = BTreeMap::new();
        table.insert("middle_name".to_string(), vec!["segundo".to_string()]);
        let err = NamingConventions::from_config(&table).unwrap_err();
        assert!(matches!(err, PgxFhirError::Configuration(_)));
        assert!(err.to_string().contains("middle_name"));
    }

    #[test]
    fn test_logical_field_keys_parse() {
        for field in LogicalField::ALL {
            assert_eq!(field.key().parse::<LogicalField>().unwrap(), field);
        }
    }
}
