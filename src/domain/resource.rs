//! FHIR resource type vocabulary
//!
//! The handful of resource types this crate emits, with the helpers used to
//! derive identifier prefixes and `"<ResourceType>/<id>"` references.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Resource types produced by the bundle builders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    /// FHIR `Patient`
    Patient,
    /// FHIR `Specimen`
    Specimen,
    /// FHIR `Observation`
    Observation,
    /// FHIR `Bundle`
    Bundle,
}

impl ResourceType {
    /// Returns the FHIR `resourceType` string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Patient => "Patient",
            Self::Specimen => "Specimen",
            Self::Observation => "Observation",
            Self::Bundle => "Bundle",
        }
    }

    /// Prefix used for synthesized identifiers (`patient`, `specimen`, ...)
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Self::Patient => "patient",
            Self::Specimen => "specimen",
            Self::Observation => "observation",
            Self::Bundle => "bundle",
        }
    }

    /// Builds a relative reference such as `Patient/P1`
    ///
    /// # Examples
    ///
    /// ```
    /// use pgx_fhir::domain::ResourceType;
    ///
    /// assert_eq!(ResourceType::Specimen.reference("S1"), "Specimen/S1");
    /// ```
    pub fn reference(&self, id: &str) -> String {
        format!("{}/{}", self.as_str(), id)
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Patient" => Ok(Self::Patient),
            "Specimen" => Ok(Self::Specimen),
            "Observation" => Ok(Self::Observation),
            "Bundle" => Ok(Self::Bundle),
            other => Err(format!("Unsupported resource type: {other}")),
        }
    }
}

/// Splits a relative reference into its type and id parts
///
/// Returns `None` unless the reference has exactly the `Type/id` shape with
/// both parts non-empty.
pub fn split_reference(reference: &str) -> Option<(&str, &str)> {
    let (kind, id) = reference.split_once('/')?;
    if kind.is_empty() || id.is_empty() || id.contains('/') {
        return None;
    }
    Some((kind, id))
}
