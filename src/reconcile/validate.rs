use super::Row;
use crate::entity::ManifestEntry;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid,
    /// Labels of unresolved entries, in manifest order.
    Missing(Vec<String>),
}

/// An entry fails only when its value is null (or the key is absent);
/// `false` and `0` are answers.
pub fn validate_additional_data(manifest: &[ManifestEntry], additional_data: &Row) -> Validation {
    let missing: Vec<String> = manifest
        .iter()
        .filter(|e| additional_data.get(&e.key).map_or(true, Value::is_null))
        .map(|e| e.label.clone())
        .collect();

    if missing.is_empty() {
        Validation::Valid
    } else {
        Validation::Missing(missing)
    }
}
