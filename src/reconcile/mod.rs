//! Row-edit reconciliation.
//!
//! A save hands over the sparse change set a user produced and the last
//! known full row. The change set is merged over the row field by field
//! (including the nested `additional_data` object), the entity's required
//! fields are checked, and the result is either a complete update payload
//! or the ordered list of labels still missing. Nothing here performs I/O
//! or keeps state between calls.

mod merge;
mod payload;
mod resolve;
mod validate;

#[cfg(test)]
mod property;

pub use merge::merge_additional_data;
pub use payload::{build_payload, UpdatePayload, ADDITIONAL_DATA, RADIO_CHANNELS, TV_CHANNELS};
pub use resolve::{as_row, resolve_field};
pub use validate::{validate_additional_data, Validation};

use crate::entity::EntityConfig;
use serde::Serialize;

/// A row or sparse change set as the grid reports it.
pub type Row = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// The grid reported no edited row; nothing to send.
    NoChanges,
    Invalid { labels: Vec<String> },
    Success { payload: UpdatePayload },
}

pub fn reconcile(config: &EntityConfig, change_set: Option<&Row>, fallback: &Row) -> Outcome {
    let Some(changes) = change_set else {
        tracing::debug!("reconcile: no changes");
        return Outcome::NoChanges;
    };

    let payload = build_payload(config, changes, fallback);
    match validate_additional_data(&config.manifest, &payload.additional_data) {
        Validation::Valid => {
            tracing::debug!(id = %payload.id, "reconcile: payload ready");
            Outcome::Success { payload }
        }
        Validation::Missing(labels) => {
            tracing::debug!(id = %payload.id, missing = labels.len(), "reconcile: rejected");
            Outcome::Invalid { labels }
        }
    }
}
