use serde_json::Value;

use super::page_from_envelope;
use super::types::{Meeting, Page};
use crate::gateway::{Gateway, GatewayError, HttpMethod, RequestBody, RequestOpts};
use crate::listview::ListQuery;

/// `mine` narrows to the calling tutor's meetings ("my meetings" view).
pub fn list(
    gw: &mut Gateway,
    token: Option<&str>,
    q: &ListQuery,
    mine: bool,
) -> Result<Page<Meeting>, GatewayError> {
    let path = if mine { "/meetings/my-meetings" } else { "/meetings" };
    let body = gw.get(path, q.to_query_pairs(), token)?;
    page_from_envelope(body, &["meetings"])
}

pub fn schedule(
    gw: &mut Gateway,
    token: Option<&str>,
    payload: Value,
) -> Result<Value, GatewayError> {
    gw.call(
        HttpMethod::Post,
        "/meetings",
        Vec::new(),
        RequestBody::Json(payload),
        token,
        &RequestOpts::with_message("Meeting scheduled"),
    )
}

pub fn update(
    gw: &mut Gateway,
    token: Option<&str>,
    id: i64,
    patch: Value,
) -> Result<Value, GatewayError> {
    gw.call(
        HttpMethod::Patch,
        &format!("/meetings/{}", id),
        Vec::new(),
        RequestBody::Json(patch),
        token,
        &RequestOpts::default(),
    )
}

pub fn delete(gw: &mut Gateway, token: Option<&str>, id: i64) -> Result<(), GatewayError> {
    gw.call(
        HttpMethod::Delete,
        &format!("/meetings/{}", id),
        Vec::new(),
        RequestBody::None,
        token,
        &RequestOpts::with_message("Meeting deleted"),
    )?;
    Ok(())
}
