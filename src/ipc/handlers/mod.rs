pub mod admins;
pub mod catalogs;
pub mod core;
pub mod documents;
pub mod meetings;
pub mod reports;
pub mod students;
pub mod tutors;

use chrono::Utc;
use serde_json::json;

use crate::gateway::GatewayError;
use crate::ipc::error::err;
use crate::ipc::types::{AppState, Request};
use crate::listview::{ListQuery, ListQueryError};

pub(crate) fn required_str(req: &Request, key: &str) -> Result<String, serde_json::Value> {
    req.params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|v| v.to_string())
        .ok_or_else(|| err(&req.id, "bad_params", format!("missing {}", key), None))
}

pub(crate) fn required_i64(req: &Request, key: &str) -> Result<i64, serde_json::Value> {
    req.params
        .get(key)
        .and_then(|v| v.as_i64())
        .ok_or_else(|| err(&req.id, "bad_params", format!("missing {}", key), None))
}

pub(crate) fn object_param(
    req: &Request,
    key: &str,
) -> Result<serde_json::Value, serde_json::Value> {
    match req.params.get(key) {
        Some(v) if v.is_object() => Ok(v.clone()),
        _ => Err(err(
            &req.id,
            "bad_params",
            format!("missing object {}", key),
            None,
        )),
    }
}

pub(crate) fn list_query(req: &Request) -> Result<ListQuery, serde_json::Value> {
    ListQuery::from_params(&req.params).map_err(|ListQueryError(msg)| {
        err(&req.id, "bad_params", msg, None)
    })
}

pub(crate) fn gw_err(req: &Request, e: GatewayError) -> serde_json::Value {
    let details = e.status.map(|s| json!({ "httpStatus": s }));
    err(&req.id, &e.code, e.message, details)
}

/// Bearer token of the live session, if any. Requests go out unauthenticated
/// otherwise and the backend's 401 surfaces through the gateway.
pub(crate) fn auth_token(state: &AppState) -> Option<String> {
    let db = state.session.as_ref()?;
    match db.active(Utc::now()) {
        Ok(rec) => rec.map(|r| r.token),
        Err(e) => {
            log::warn!("session lookup failed: {}", e);
            None
        }
    }
}
