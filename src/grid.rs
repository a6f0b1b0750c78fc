//! Adapting what the data grid reports on save into reconciler inputs.

use crate::entity::EntityConfig;
use crate::reconcile::{Row, ADDITIONAL_DATA};
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FragmentError {
    #[error("change key {0:?} has an empty path segment")]
    EmptySegment(String),
}

/// Change set for `config` from a raw grid fragment: dotted keys expanded,
/// then top-level required fields moved under `additional_data`.
pub fn change_set(fragment: &Row, config: &EntityConfig) -> Result<Row, FragmentError> {
    Ok(lift_manifest_fields(expand_change_fragment(fragment)?, config))
}

/// Expands dotted data-field keys (`additional_data.has_electricity`) into
/// nested objects. Plain keys pass through; a nested object already present
/// under the same parent is merged into.
pub fn expand_change_fragment(fragment: &Row) -> Result<Row, FragmentError> {
    let mut out = Row::new();
    for (key, value) in fragment {
        let path: Vec<&str> = key.split('.').collect();
        if path.iter().any(|seg| seg.is_empty()) {
            return Err(FragmentError::EmptySegment(key.clone()));
        }
        insert_path(&mut out, &path, value.clone());
    }
    Ok(out)
}

/// Moves top-level keys naming manifest fields under `additional_data`.
/// A value already nested there wins.
pub fn lift_manifest_fields(mut changes: Row, config: &EntityConfig) -> Row {
    let mut lifted = Row::new();
    for key in config.keys() {
        if let Some(v) = changes.remove(key) {
            lifted.insert(key.to_string(), v);
        }
    }
    if lifted.is_empty() {
        return changes;
    }

    let slot = changes
        .entry(ADDITIONAL_DATA)
        .or_insert_with(|| Value::Object(Row::new()));
    if !slot.is_object() {
        *slot = Value::Object(Row::new());
    }
    if let Value::Object(nested) = slot {
        for (k, v) in lifted {
            nested.entry(k).or_insert(v);
        }
    }
    changes
}

fn insert_path(target: &mut Row, path: &[&str], value: Value) {
    let Some((head, rest)) = path.split_first() else {
        return;
    };
    if rest.is_empty() {
        if let Value::Object(incoming) = value {
            if let Some(Value::Object(existing)) = target.get_mut(*head) {
                for (k, v) in incoming {
                    insert_path(existing, &[k.as_str()], v);
                }
                return;
            }
            target.insert(head.to_string(), Value::Object(incoming));
            return;
        }
        target.insert(head.to_string(), value);
        return;
    }

    let slot = target
        .entry(head.to_string())
        .or_insert_with(|| Value::Object(Row::new()));
    if !slot.is_object() {
        *slot = Value::Object(Row::new());
    }
    if let Value::Object(child) = slot {
        insert_path(child, rest, value);
    }
}

/// First row in `rows` whose `id_field` equals `key`.
pub fn locate_row<'a>(rows: &'a [Value], id_field: &str, key: &Value) -> Option<&'a Row> {
    rows.iter()
        .filter_map(Value::as_object)
        .find(|r| r.get(id_field) == Some(key))
}
