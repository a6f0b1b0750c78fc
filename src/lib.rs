//! Row-edit reconciliation for the facility survey console.
//!
//! The library is the pure reconciler plus the entity tables it is
//! parametrized by; the `surveyd` binary exposes it to the grid screens as a
//! JSON-lines sidecar.

pub mod config;
pub mod entity;
pub mod grid;
pub mod ipc;
pub mod notice;
pub mod reconcile;

pub use entity::{EntityConfig, EntityRegistry, ManifestEntry};
pub use reconcile::{reconcile, Outcome, Row, UpdatePayload};
