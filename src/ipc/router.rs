use super::handlers;
use super::types::{AppState, Request};
use crate::ipc::error::err;

/// Dispatches to the handler families in order, then attaches the notices
/// the gateway accumulated while serving the request. Notices ride on both
/// ok and error envelopes; they are presentation-only.
pub fn handle_request(state: &mut AppState, req: Request) -> serde_json::Value {
    let mut resp = dispatch(state, &req);
    let notices = state.gateway.take_notices();
    if let Some(obj) = resp.as_object_mut() {
        obj.insert("notices".to_string(), serde_json::json!(notices));
    }
    resp
}

fn dispatch(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Some(resp) = handlers::core::try_handle(state, req) {
        return resp;
    }
    if let Some(resp) = handlers::students::try_handle(state, req) {
        return resp;
    }
    if let Some(resp) = handlers::tutors::try_handle(state, req) {
        return resp;
    }
    if let Some(resp) = handlers::admins::try_handle(state, req) {
        return resp;
    }
    if let Some(resp) = handlers::meetings::try_handle(state, req) {
        return resp;
    }
    if let Some(resp) = handlers::reports::try_handle(state, req) {
        return resp;
    }
    if let Some(resp) = handlers::documents::try_handle(state, req) {
        return resp;
    }
    if let Some(resp) = handlers::catalogs::try_handle(state, req) {
        return resp;
    }

    err(
        &req.id,
        "not_implemented",
        format!("unknown method: {}", req.method),
        None,
    )
}
