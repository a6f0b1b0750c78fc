use super::resolve::resolve_field;
use super::Row;
use crate::entity::ManifestEntry;

/// Builds `additional_data` with exactly the manifest keys, in manifest order.
pub fn merge_additional_data(
    manifest: &[ManifestEntry],
    changes: Option<&Row>,
    fallback: Option<&Row>,
) -> Row {
    let mut out = Row::new();
    for entry in manifest {
        out.insert(
            entry.key.clone(),
            resolve_field(changes, fallback, &entry.key),
        );
    }
    out
}
