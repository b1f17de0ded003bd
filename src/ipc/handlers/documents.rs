use serde_json::json;

use super::{auth_token, gw_err, list_query, object_param, required_i64};
use crate::api;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::listview::{PageMeta, DEFAULT_PAGE_SIZE};

fn handle_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let q = match list_query(req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let token = auth_token(state);
    let page = match api::documents::list(&mut state.gateway, token.as_deref(), &q) {
        Ok(p) => p,
        Err(e) => return gw_err(req, e),
    };
    let meta = match PageMeta::build(
        q.page.unwrap_or(1),
        q.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        page.total,
    ) {
        Ok(m) => m,
        Err(e) => return err(&req.id, "bad_params", e.0, None),
    };
    ok(&req.id, json!({ "documents": page.items, "pageMeta": meta }))
}

fn handle_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let id = match required_i64(req, "documentId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let token = auth_token(state);
    match api::documents::get(&mut state.gateway, token.as_deref(), id) {
        Ok(document) => ok(&req.id, json!({ "document": document })),
        Err(e) => gw_err(req, e),
    }
}

fn handle_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let payload = match object_param(req, "document") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let token = auth_token(state);
    match api::documents::create(&mut state.gateway, token.as_deref(), payload) {
        Ok(body) => ok(&req.id, json!({ "created": body })),
        Err(e) => gw_err(req, e),
    }
}

fn handle_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let id = match required_i64(req, "documentId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let patch = match object_param(req, "patch") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let token = auth_token(state);
    match api::documents::update(&mut state.gateway, token.as_deref(), id, patch) {
        Ok(body) => ok(&req.id, json!({ "updated": body })),
        Err(e) => gw_err(req, e),
    }
}

fn handle_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let id = match required_i64(req, "documentId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let token = auth_token(state);
    match api::documents::delete(&mut state.gateway, token.as_deref(), id) {
        Ok(()) => ok(&req.id, json!({ "ok": true })),
        Err(e) => gw_err(req, e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "documents.list" => Some(handle_list(state, req)),
        "documents.get" => Some(handle_get(state, req)),
        "documents.create" => Some(handle_create(state, req)),
        "documents.update" => Some(handle_update(state, req)),
        "documents.delete" => Some(handle_delete(state, req)),
        _ => None,
    }
}
