use serde_json::json;

use super::{auth_token, gw_err, list_query, object_param, required_i64, required_str};
use crate::api;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::listview::{compact_blank_rows, PageMeta, DEFAULT_PAGE_SIZE};

fn handle_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let q = match list_query(req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let token = auth_token(state);
    let page = match api::students::list(&mut state.gateway, token.as_deref(), &q) {
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
    ok(&req.id, json!({ "students": page.items, "pageMeta": meta }))
}

fn handle_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let id = match required_i64(req, "studentId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let token = auth_token(state);
    match api::students::get(&mut state.gateway, token.as_deref(), id) {
        Ok(student) => ok(&req.id, json!({ "student": student })),
        Err(e) => gw_err(req, e),
    }
}

fn handle_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let payload = match object_param(req, "student") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let token = auth_token(state);
    match api::students::create(&mut state.gateway, token.as_deref(), payload) {
        Ok(body) => ok(&req.id, json!({ "created": body })),
        Err(e) => gw_err(req, e),
    }
}

fn handle_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let id = match required_i64(req, "studentId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let patch = match object_param(req, "patch") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let token = auth_token(state);
    match api::students::update(&mut state.gateway, token.as_deref(), id, patch) {
        Ok(body) => ok(&req.id, json!({ "updated": body })),
        Err(e) => gw_err(req, e),
    }
}

fn handle_update_profile(state: &mut AppState, req: &Request) -> serde_json::Value {
    let id = match required_i64(req, "studentId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let patch = match object_param(req, "patch") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let token = auth_token(state);
    match api::students::update_profile(&mut state.gateway, token.as_deref(), id, patch) {
        Ok(body) => ok(&req.id, json!({ "updated": body })),
        Err(e) => gw_err(req, e),
    }
}

fn handle_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let id = match required_i64(req, "studentId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let token = auth_token(state);
    match api::students::delete(&mut state.gateway, token.as_deref(), id) {
        Ok(()) => ok(&req.id, json!({ "ok": true })),
        Err(e) => gw_err(req, e),
    }
}

fn handle_without_tutor(state: &mut AppState, req: &Request) -> serde_json::Value {
    let token = auth_token(state);
    match api::students::without_tutor(&mut state.gateway, token.as_deref()) {
        Ok(students) => ok(&req.id, json!({ "students": students })),
        Err(e) => gw_err(req, e),
    }
}

/// Subject-state sub-list shown inside the student detail view. Compact
/// mode: the shell pads with blank rows to keep the table height constant.
fn handle_subjects(state: &mut AppState, req: &Request) -> serde_json::Value {
    let student_id = match required_i64(req, "studentId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let career_id = match required_i64(req, "careerId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let page_size = req
        .params
        .get("pageSize")
        .and_then(|v| v.as_i64())
        .unwrap_or(DEFAULT_PAGE_SIZE);
    let token = auth_token(state);
    match api::students::subjects(&mut state.gateway, token.as_deref(), student_id, career_id) {
        Ok(subjects) => {
            let blank_rows = compact_blank_rows(subjects.len(), page_size);
            ok(
                &req.id,
                json!({ "subjects": subjects, "blankRows": blank_rows }),
            )
        }
        Err(e) => gw_err(req, e),
    }
}

fn handle_change_subject_state(state: &mut AppState, req: &Request) -> serde_json::Value {
    let student_id = match required_i64(req, "studentId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let patch = match object_param(req, "patch") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let token = auth_token(state);
    match api::students::change_subject_state(&mut state.gateway, token.as_deref(), student_id, patch)
    {
        Ok(body) => ok(&req.id, json!({ "updated": body })),
        Err(e) => gw_err(req, e),
    }
}

fn handle_upload(state: &mut AppState, req: &Request) -> serde_json::Value {
    let path = match required_str(req, "path") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let bytes = match std::fs::read(&path) {
        Ok(b) => b,
        Err(e) => return err(&req.id, "file_read_failed", e.to_string(), None),
    };
    let file_name = std::path::Path::new(&path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "students.xlsx".to_string());
    let token = auth_token(state);
    match api::students::upload(&mut state.gateway, token.as_deref(), &file_name, bytes) {
        Ok(body) => ok(&req.id, json!({ "imported": body })),
        Err(e) => gw_err(req, e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.list" => Some(handle_list(state, req)),
        "students.get" => Some(handle_get(state, req)),
        "students.create" => Some(handle_create(state, req)),
        "students.update" => Some(handle_update(state, req)),
        "students.updateProfile" => Some(handle_update_profile(state, req)),
        "students.delete" => Some(handle_delete(state, req)),
        "students.withoutTutor" => Some(handle_without_tutor(state, req)),
        "students.subjects" => Some(handle_subjects(state, req)),
        "students.changeSubjectState" => Some(handle_change_subject_state(state, req)),
        "students.upload" => Some(handle_upload(state, req)),
        _ => None,
    }
}
