use crate::entity::EntityConfig;
use crate::grid::{change_set, locate_row};
use crate::ipc::error::{ok, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::notice;
use crate::reconcile::{reconcile, Outcome, Row};
use serde_json::json;

fn entity_config<'a>(state: &'a AppState, req: &Request) -> Result<&'a EntityConfig, HandlerErr> {
    let Some(name) = req.params.get("entity").and_then(|v| v.as_str()) else {
        return Err(HandlerErr::bad_params("missing entity"));
    };
    state.registry.get(name).ok_or_else(|| {
        tracing::warn!(entity = name, "unknown entity");
        HandlerErr {
            code: "unknown_entity",
            message: format!("unknown entity: {}", name),
            details: Some(json!({ "entity": name })),
        }
    })
}

/// Absent or null means the grid reported no edit.
fn change_fragment(
    config: &EntityConfig,
    value: Option<&serde_json::Value>,
    what: &str,
) -> Result<Option<Row>, HandlerErr> {
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::Object(obj)) => change_set(obj, config)
            .map(Some)
            .map_err(|e| HandlerErr::bad_params(format!("{}: {}", what, e))),
        Some(_) => Err(HandlerErr::bad_params(format!("{} must be an object", what))),
    }
}

fn outcome_result(outcome: &Outcome) -> Result<serde_json::Value, HandlerErr> {
    let mut result = serde_json::to_value(outcome).map_err(|e| HandlerErr {
        code: "internal",
        message: e.to_string(),
        details: None,
    })?;
    if let Some(obj) = result.as_object_mut() {
        obj.insert(
            "cancel".into(),
            json!(matches!(outcome, Outcome::Invalid { .. })),
        );
        if let Some(n) = notice::for_outcome(outcome) {
            obj.insert("notice".into(), json!(n));
        }
    }
    Ok(result)
}

fn reconcile_row(state: &AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let config = entity_config(state, req)?;
    let Some(row) = req.params.get("row").and_then(|v| v.as_object()) else {
        return Err(HandlerErr::bad_params("missing/invalid row"));
    };
    let changes = change_fragment(config, req.params.get("change"), "change")?;

    let outcome = reconcile(config, changes.as_ref(), row);
    outcome_result(&outcome)
}

fn save(state: &AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let config = entity_config(state, req)?;
    let Some(changes) = req.params.get("changes").and_then(|v| v.as_array()) else {
        return Err(HandlerErr::bad_params("missing changes[]"));
    };
    let Some(rows) = req.params.get("rows").and_then(|v| v.as_array()) else {
        return Err(HandlerErr::bad_params("missing rows[]"));
    };

    // Row editing mode: one row per save, so only the first change counts.
    let Some(first) = changes.first() else {
        return outcome_result(&Outcome::NoChanges);
    };
    let Some(change) = first.as_object() else {
        return Err(HandlerErr::bad_params("change at index 0 must be an object"));
    };
    let Some(key) = change.get("key") else {
        return Err(HandlerErr::bad_params("change at index 0 missing key"));
    };
    let data = change_fragment(config, change.get("data"), "change data")?.unwrap_or_default();

    let Some(row) = locate_row(rows, &config.id_field, key) else {
        tracing::warn!(key = %key, "edited row not in snapshot");
        return Err(HandlerErr {
            code: "not_found",
            message: "edited row not found".to_string(),
            details: Some(json!({ "key": key, "idField": config.id_field })),
        });
    };

    let outcome = reconcile(config, Some(&data), row);
    outcome_result(&outcome)
}

fn handle_rows_reconcile(state: &mut AppState, req: &Request) -> serde_json::Value {
    match reconcile_row(state, req) {
        Ok(result) => ok(&req.id, result),
        Err(e) => e.response(&req.id),
    }
}

fn handle_grid_save(state: &mut AppState, req: &Request) -> serde_json::Value {
    match save(state, req) {
        Ok(result) => ok(&req.id, result),
        Err(e) => e.response(&req.id),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "rows.reconcile" => Some(handle_rows_reconcile(state, req)),
        "grid.save" => Some(handle_grid_save(state, req)),
        _ => None,
    }
}
