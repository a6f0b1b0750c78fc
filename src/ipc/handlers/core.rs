use crate::ipc::error::ok;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "entities": state.registry.names().collect::<Vec<_>>()
        }),
    )
}

fn handle_entities_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let entities: Vec<serde_json::Value> = state
        .registry
        .iter()
        .map(|(name, cfg)| {
            json!({
                "name": name,
                "idField": cfg.id_field,
                "manifest": cfg.manifest
            })
        })
        .collect();
    ok(&req.id, json!({ "entities": entities }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "entities.list" => Some(handle_entities_list(state, req)),
        _ => None,
    }
}
