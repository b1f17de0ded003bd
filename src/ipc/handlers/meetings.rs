use chrono::Utc;
use serde_json::json;

use super::{auth_token, gw_err, list_query, object_param, required_i64};
use crate::api;
use crate::api::types::Meeting;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::listview::{PageMeta, DEFAULT_PAGE_SIZE};
use crate::status::{
    allowed_actions, derive_display_status, schedule_elapsed, DisplayStatus, MeetingStatus,
};

/// One table row: the raw meeting plus everything derived from it. The
/// shell renders exactly what it gets; it never re-derives the status.
fn meeting_row(meeting: &Meeting, now: chrono::NaiveDateTime) -> serde_json::Value {
    let status = row_status(meeting, now);
    json!({
        "meeting": meeting,
        "displayStatus": status.as_str(),
        "badge": status.badge(),
        "actions": allowed_actions(status),
    })
}

fn row_status(meeting: &Meeting, now: chrono::NaiveDateTime) -> DisplayStatus {
    let persisted = meeting
        .status
        .as_deref()
        .and_then(MeetingStatus::parse)
        .unwrap_or(MeetingStatus::Pending);
    let computed = meeting
        .computed_status
        .as_deref()
        .and_then(MeetingStatus::parse);
    let elapsed = schedule_elapsed(&meeting.date, &meeting.time, now);
    derive_display_status(persisted, computed, meeting.report.is_some(), elapsed)
}

fn handle_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let q = match list_query(req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let mine = req
        .params
        .get("mine")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);
    let token = auth_token(state);
    let page = match api::meetings::list(&mut state.gateway, token.as_deref(), &q, mine) {
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
    let now = Utc::now().naive_utc();
    let rows: Vec<serde_json::Value> = page.items.iter().map(|m| meeting_row(m, now)).collect();
    ok(&req.id, json!({ "meetings": rows, "pageMeta": meta }))
}

fn handle_schedule(state: &mut AppState, req: &Request) -> serde_json::Value {
    let payload = match object_param(req, "meeting") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let token = auth_token(state);
    match api::meetings::schedule(&mut state.gateway, token.as_deref(), payload) {
        Ok(body) => ok(&req.id, json!({ "created": body })),
        Err(e) => gw_err(req, e),
    }
}

fn handle_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let id = match required_i64(req, "meetingId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let patch = match object_param(req, "patch") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let token = auth_token(state);
    match api::meetings::update(&mut state.gateway, token.as_deref(), id, patch) {
        Ok(body) => ok(&req.id, json!({ "updated": body })),
        Err(e) => gw_err(req, e),
    }
}

fn handle_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let id = match required_i64(req, "meetingId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let token = auth_token(state);
    match api::meetings::delete(&mut state.gateway, token.as_deref(), id) {
        Ok(()) => ok(&req.id, json!({ "ok": true })),
        Err(e) => gw_err(req, e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "meetings.list" => Some(handle_list(state, req)),
        "meetings.schedule" => Some(handle_schedule(state, req)),
        "meetings.update" => Some(handle_update(state, req)),
        "meetings.delete" => Some(handle_delete(state, req)),
        _ => None,
    }
}
