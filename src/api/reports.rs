use serde_json::json;

use super::types::Report;
use super::{decode, unwrap_entity};
use crate::flows::ResolvedDraft;
use crate::gateway::{Gateway, GatewayError, HttpMethod, RequestBody, RequestOpts};

/// Files the report. Only reachable through the confirmed submit flow; the
/// backend keeps the legacy `topicos` field name.
pub fn create(
    gw: &mut Gateway,
    token: Option<&str>,
    meeting_id: i64,
    draft: &ResolvedDraft,
) -> Result<Report, GatewayError> {
    let body = gw.call(
        HttpMethod::Post,
        "/reports",
        Vec::new(),
        RequestBody::Json(json!({
            "meetingId": meeting_id,
            "topicos": draft.topics,
            "comments": draft.comments,
            "careerId": draft.career_id,
        })),
        token,
        &RequestOpts::with_message("Report filed"),
    )?;
    decode(unwrap_entity(body, &["report", "data"]))
}

/// The 0-or-1 report of a meeting; a backend 404 means "none yet" and is
/// not surfaced as an error toast.
pub fn get_for_meeting(
    gw: &mut Gateway,
    token: Option<&str>,
    meeting_id: i64,
) -> Result<Option<Report>, GatewayError> {
    let res = gw.call(
        HttpMethod::Get,
        &format!("/reports/meeting/{}", meeting_id),
        Vec::new(),
        RequestBody::None,
        token,
        &RequestOpts::silent(),
    );
    match res {
        Ok(body) if body.is_null() => Ok(None),
        Ok(body) => Ok(Some(decode(unwrap_entity(body, &["report", "data"]))?)),
        Err(e) if e.status == Some(404) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Deleting the report reopens report creation for its meeting.
pub fn delete(gw: &mut Gateway, token: Option<&str>, report_id: i64) -> Result<(), GatewayError> {
    gw.call(
        HttpMethod::Delete,
        &format!("/reports/{}", report_id),
        Vec::new(),
        RequestBody::None,
        token,
        &RequestOpts::with_message("Report deleted"),
    )?;
    Ok(())
}
