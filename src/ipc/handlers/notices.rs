use crate::ipc::error::{ok, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::notice::{self, Notice};
use serde_json::json;

fn notice_result(req: &Request, notice: Notice) -> serde_json::Value {
    ok(&req.id, json!({ "notice": notice }))
}

fn handle_persistence(_state: &mut AppState, req: &Request) -> serde_json::Value {
    let transport_failed = req
        .params
        .get("transportFailed")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);
    if transport_failed {
        return notice_result(req, notice::persistence_unreachable());
    }

    let status = match req.params.get("status").and_then(|v| v.as_u64()) {
        Some(v) if v <= u16::MAX as u64 => v as u16,
        _ => {
            return HandlerErr::bad_params("missing/invalid status").response(&req.id);
        }
    };
    notice_result(req, notice::persistence_status(status))
}

fn handle_load_failed(_state: &mut AppState, req: &Request) -> serde_json::Value {
    notice_result(req, notice::load_failed())
}

fn handle_edit_canceled(_state: &mut AppState, req: &Request) -> serde_json::Value {
    notice_result(req, notice::edit_canceled())
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "notices.persistence" => Some(handle_persistence(state, req)),
        "notices.loadFailed" => Some(handle_load_failed(state, req)),
        "notices.editCanceled" => Some(handle_edit_canceled(state, req)),
        _ => None,
    }
}
