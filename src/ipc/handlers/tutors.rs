use serde_json::json;

use super::{auth_token, gw_err, list_query, object_param, required_i64};
use crate::api;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::listview::{PageMeta, DEFAULT_PAGE_SIZE};

fn student_ids(req: &Request) -> Result<Vec<i64>, serde_json::Value> {
    let ids: Option<Vec<i64>> = req
        .params
        .get("studentIds")
        .and_then(|v| v.as_array())
        .map(|arr| arr.iter().filter_map(|v| v.as_i64()).collect());
    match ids {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(err(
            &req.id,
            "bad_params",
            "missing non-empty studentIds",
            None,
        )),
    }
}

fn handle_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let q = match list_query(req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let token = auth_token(state);
    let page = match api::tutors::list(&mut state.gateway, token.as_deref(), &q) {
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
    ok(&req.id, json!({ "tutors": page.items, "pageMeta": meta }))
}

fn handle_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let id = match required_i64(req, "tutorId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let token = auth_token(state);
    match api::tutors::get(&mut state.gateway, token.as_deref(), id) {
        Ok(tutor) => ok(&req.id, json!({ "tutor": tutor })),
        Err(e) => gw_err(req, e),
    }
}

fn handle_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let payload = match object_param(req, "tutor") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let token = auth_token(state);
    match api::tutors::create(&mut state.gateway, token.as_deref(), payload) {
        Ok(body) => ok(&req.id, json!({ "created": body })),
        Err(e) => gw_err(req, e),
    }
}

fn handle_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let id = match required_i64(req, "tutorId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let patch = match object_param(req, "patch") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let token = auth_token(state);
    match api::tutors::update(&mut state.gateway, token.as_deref(), id, patch) {
        Ok(body) => ok(&req.id, json!({ "updated": body })),
        Err(e) => gw_err(req, e),
    }
}

fn handle_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let id = match required_i64(req, "tutorId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let token = auth_token(state);
    match api::tutors::delete(&mut state.gateway, token.as_deref(), id) {
        Ok(()) => ok(&req.id, json!({ "ok": true })),
        Err(e) => gw_err(req, e),
    }
}

fn handle_students(state: &mut AppState, req: &Request) -> serde_json::Value {
    let id = match required_i64(req, "tutorId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let token = auth_token(state);
    match api::tutors::students(&mut state.gateway, token.as_deref(), id) {
        Ok(students) => ok(&req.id, json!({ "students": students })),
        Err(e) => gw_err(req, e),
    }
}

fn handle_assign(state: &mut AppState, req: &Request) -> serde_json::Value {
    let tutor_id = match required_i64(req, "tutorId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let ids = match student_ids(req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let token = auth_token(state);
    match api::tutors::assign(&mut state.gateway, token.as_deref(), tutor_id, &ids) {
        Ok(()) => ok(&req.id, json!({ "ok": true })),
        Err(e) => gw_err(req, e),
    }
}

fn handle_unassign(state: &mut AppState, req: &Request) -> serde_json::Value {
    let tutor_id = match required_i64(req, "tutorId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let ids = match student_ids(req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let token = auth_token(state);
    match api::tutors::unassign(&mut state.gateway, token.as_deref(), tutor_id, &ids) {
        Ok(()) => ok(&req.id, json!({ "ok": true })),
        Err(e) => gw_err(req, e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "tutors.list" => Some(handle_list(state, req)),
        "tutors.get" => Some(handle_get(state, req)),
        "tutors.create" => Some(handle_create(state, req)),
        "tutors.update" => Some(handle_update(state, req)),
        "tutors.delete" => Some(handle_delete(state, req)),
        "tutors.students" => Some(handle_students(state, req)),
        "tutors.assign" => Some(handle_assign(state, req)),
        "tutors.unassign" => Some(handle_unassign(state, req)),
        _ => None,
    }
}
