use super::merge::merge_additional_data;
use super::resolve::{as_row, resolve_field};
use super::Row;
use crate::entity::EntityConfig;
use serde::Serialize;
use serde_json::Value;

pub const ADDITIONAL_DATA: &str = "additional_data";
pub const TV_CHANNELS: &str = "tv_channels";
pub const RADIO_CHANNELS: &str = "radio_channels";

/// Fully resolved row update, ready for the persistence call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdatePayload {
    pub id: Value,
    pub additional_data: Row,
    pub tv_channels: Vec<Value>,
    pub radio_channels: Vec<Value>,
}

pub fn build_payload(config: &EntityConfig, changes: &Row, fallback: &Row) -> UpdatePayload {
    let additional_data = merge_additional_data(
        &config.manifest,
        as_row(changes.get(ADDITIONAL_DATA)),
        as_row(fallback.get(ADDITIONAL_DATA)),
    );

    UpdatePayload {
        id: fallback.get(&config.id_field).cloned().unwrap_or(Value::Null),
        additional_data,
        tv_channels: channel_list(resolve_field(Some(changes), Some(fallback), TV_CHANNELS)),
        radio_channels: channel_list(resolve_field(Some(changes), Some(fallback), RADIO_CHANNELS)),
    }
}

/// Falsy values (null, false, 0, "") become an empty list; a lone scalar is
/// wrapped as a single channel.
fn channel_list(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Null | Value::Bool(false) => Vec::new(),
        Value::Number(ref n) if n.as_f64() == Some(0.0) => Vec::new(),
        Value::String(ref s) if s.is_empty() => Vec::new(),
        other => vec![other],
    }
}
