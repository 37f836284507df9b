//! Collection Bundle assembly
//!
//! Wraps an ordered sequence of resource documents into a FHIR `collection`
//! Bundle. Each entry's `fullUrl` is derived from the resource id, so the
//! two can never disagree.

use crate::core::context::BuildContext;
use crate::core::fields::coerce_to_string;
use crate::domain::ResourceType;
use serde_json::{json, Value};
use std::collections::HashSet;

/// Scheme prefix of every entry `fullUrl`
pub const URN_UUID_PREFIX: &str = "urn:uuid:";

/// `fullUrl` for a resource id
pub fn full_url(id: &str) -> String {
    format!("{URN_UUID_PREFIX}{id}")
}

/// Assembles a `collection` Bundle from resources, preserving their order
///
/// Resources are copied, never modified in place. A resource without a
/// usable `id` (missing, null or empty) gets one from the context, prefixed
/// with its lowercased `resourceType` (`resource` when that is missing too).
/// Values that are not JSON objects cannot be FHIR resources and are
/// skipped with a warning.
///
/// # Examples
///
/// ```
/// use pgx_fhir::core::bundle::assemble_collection;
/// use pgx_fhir::core::context::BuildContext;
/// use serde_json::json;
///
/// let resources = vec![json!({"resourceType": "Patient", "id": "P1"})];
/// let bundle = assemble_collection(&resources, Some("B1"), &BuildContext::system());
///
/// assert_eq!(bundle["id"], "B1");
/// assert_eq!(bundle["type"], "collection");
/// assert_eq!(bundle["entry"][0]["fullUrl"], "urn:uuid:P1");
/// ```
pub fn assemble_collection(
    resources: &[Value],
    bundle_id: Option<&str>,
    ctx: &BuildContext<'_>,
) -> Value {
    let bundle_id = bundle_id
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| ctx.new_id(ResourceType::Bundle.id_prefix()));

    let mut seen = HashSet::with_capacity(resources.len());
    let mut entries = Vec::with_capacity(resources.len());

    for (position, resource) in resources.iter().enumerate() {
        let Some(original) = resource.as_object() else {
            tracing::warn!(position, "Skipping bundle entry that is not a JSON object");
            continue;
        };

        let mut copy = original.clone();
        let id = match copy.get("id").filter(|v| !v.is_null()).map(coerce_to_string) {
            Some(id) if !id.is_empty() => id,
            _ => {
                let kind = copy
                    .get("resourceType")
                    .and_then(Value::as_str)
                    .filter(|kind| !kind.is_empty())
                    .unwrap_or("Resource");
                ctx.new_id(&kind.to_lowercase())
            }
        };
        copy.insert("id".to_string(), json!(id));

        if !seen.insert(id.clone()) {
            tracing::warn!(id = %id, position, "Duplicate resource id in bundle");
        }

        entries.push(json!({
            "fullUrl": full_url(&id),
            "resource": Value::Object(copy),
        }));
    }

    tracing::debug!(bundle_id = %bundle_id, entries = entries.len(), "Assembled collection bundle");

    json!({
        "resourceType": ResourceType::Bundle.as_str(),
        "id": bundle_id,
        "type": "collection",
        "timestamp": ctx.now_text(),
        "entry": entries,
    })
}
