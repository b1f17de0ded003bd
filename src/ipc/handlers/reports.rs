use serde_json::json;

use super::{auth_token, gw_err, required_i64, required_str};
use crate::api;
use crate::flows::{validate_draft, ReportDraft, REPORT_CONFIRM_WARNING};
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::status::DisplayStatus;

/// Opens the report-creation modal: what the form needs to collect for this
/// student. The career selector only becomes required past one active
/// enrollment.
fn handle_start(state: &mut AppState, req: &Request) -> serde_json::Value {
    let meeting_id = match required_i64(req, "meetingId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let student_id = match required_i64(req, "studentId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let token = auth_token(state);
    let student = match api::students::get(&mut state.gateway, token.as_deref(), student_id) {
        Ok(s) => s,
        Err(e) => return gw_err(req, e),
    };
    let active: Vec<serde_json::Value> = student
        .careers
        .iter()
        .filter(|c| c.active)
        .map(|c| json!({ "careerId": c.career_id, "name": c.name }))
        .collect();
    ok(
        &req.id,
        json!({
            "meetingId": meeting_id,
            "activeCareers": active,
            "careerRequired": active.len() > 1,
            "warning": REPORT_CONFIRM_WARNING,
        }),
    )
}

/// Two-step submit: the first call validates and asks for confirmation, the
/// confirmed call performs the POST. Nothing goes on the wire before both
/// the validation and the confirmation have passed.
fn handle_submit(state: &mut AppState, req: &Request) -> serde_json::Value {
    let meeting_id = match required_i64(req, "meetingId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let student_id = match required_i64(req, "studentId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let topics = match required_str(req, "topics") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let comments = req
        .params
        .get("comments")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());
    let career_id = req.params.get("careerId").and_then(|v| v.as_i64());
    let confirm = req
        .params
        .get("confirm")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);

    let token = auth_token(state);

    // A meeting holds at most one report; re-creation is blocked before the
    // form's work reaches the backend.
    match api::reports::get_for_meeting(&mut state.gateway, token.as_deref(), meeting_id) {
        Ok(Some(_)) => {
            return err(
                &req.id,
                "report_exists",
                "this meeting already has a report",
                None,
            )
        }
        Ok(None) => {}
        Err(e) => return gw_err(req, e),
    }

    let student = match api::students::get(&mut state.gateway, token.as_deref(), student_id) {
        Ok(s) => s,
        Err(e) => return gw_err(req, e),
    };
    let draft = ReportDraft {
        topics,
        comments,
        career_id,
    };
    let resolved = match validate_draft(&draft, &student.careers) {
        Ok(r) => r,
        Err(reason) => {
            return err(
                &req.id,
                "validation_failed",
                reason.message(),
                Some(json!({ "reason": format!("{:?}", reason) })),
            )
        }
    };

    if !confirm {
        return ok(
            &req.id,
            json!({ "needsConfirm": true, "warning": REPORT_CONFIRM_WARNING }),
        );
    }

    match api::reports::create(&mut state.gateway, token.as_deref(), meeting_id, &resolved) {
        Ok(report) => ok(
            &req.id,
            json!({
                "report": report,
                "displayStatus": DisplayStatus::Completed.as_str(),
            }),
        ),
        Err(e) => gw_err(req, e),
    }
}

fn handle_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let meeting_id = match required_i64(req, "meetingId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let token = auth_token(state);
    match api::reports::get_for_meeting(&mut state.gateway, token.as_deref(), meeting_id) {
        Ok(Some(report)) => ok(&req.id, json!({ "report": report })),
        Ok(None) => err(&req.id, "not_found", "no report filed for this meeting", None),
        Err(e) => gw_err(req, e),
    }
}

/// Reports are immutable; delete is the only way out, and it reopens report
/// creation for the meeting.
fn handle_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let report_id = match required_i64(req, "reportId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let token = auth_token(state);
    match api::reports::delete(&mut state.gateway, token.as_deref(), report_id) {
        Ok(()) => ok(
            &req.id,
            json!({
                "ok": true,
                "meetingStatus": DisplayStatus::Reportmissing.as_str(),
            }),
        ),
        Err(e) => gw_err(req, e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "reports.start" => Some(handle_start(state, req)),
        "reports.submit" => Some(handle_submit(state, req)),
        "reports.get" => Some(handle_get(state, req)),
        "reports.delete" => Some(handle_delete(state, req)),
        _ => None,
    }
}
