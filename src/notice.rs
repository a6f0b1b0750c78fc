//! User-facing notification text for the editing screens.
//!
//! The reconciler only reports what happened; these helpers turn outcomes and
//! persistence statuses into the toasts the grid shows.

use crate::reconcile::Outcome;
use serde::Serialize;

const DEFAULT_DURATION_MS: u32 = 3000;
const EDIT_CANCELED_DURATION_MS: u32 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub duration_ms: u32,
}

impl Notice {
    fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            duration_ms: DEFAULT_DURATION_MS,
        }
    }
}

/// "Please select an option for X column." for one label, plural wording
/// otherwise. Labels carry their own leading space and are joined with ",".
pub fn missing_fields_message(labels: &[String]) -> String {
    let an = if labels.len() == 1 { "an " } else { "" };
    let s = if labels.len() > 1 { "s" } else { "" };
    format!(
        "Please select {an}option{s} for{} column{s}.",
        labels.join(",")
    )
}

pub fn no_changes() -> Notice {
    Notice::new(NoticeKind::Info, "No changes made. Nothing to update.")
}

pub fn edit_canceled() -> Notice {
    Notice {
        duration_ms: EDIT_CANCELED_DURATION_MS,
        ..Notice::new(NoticeKind::Info, "Edit cancelled.")
    }
}

/// Notice for a reconcile outcome; a successful reconcile shows nothing until
/// the update call returns.
pub fn for_outcome(outcome: &Outcome) -> Option<Notice> {
    match outcome {
        Outcome::NoChanges => Some(no_changes()),
        Outcome::Invalid { labels } => Some(Notice::new(
            NoticeKind::Error,
            missing_fields_message(labels),
        )),
        Outcome::Success { .. } => None,
    }
}

pub fn persistence_status(status: u16) -> Notice {
    match status {
        200 => Notice::new(NoticeKind::Success, "Updated successfully."),
        401 => Notice::new(NoticeKind::Error, "Unauthorized attempt."),
        _ => Notice::new(NoticeKind::Error, "Update failed."),
    }
}

pub fn persistence_unreachable() -> Notice {
    Notice::new(
        NoticeKind::Error,
        "Internal server error. Could not perform update.",
    )
}

pub fn load_failed() -> Notice {
    Notice::new(
        NoticeKind::Error,
        "Internal server error. Failed to fetch data.",
    )
}
