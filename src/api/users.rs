use serde_json::Value;

use super::page_from_envelope;
use super::types::{Page, User};
use crate::gateway::{Gateway, GatewayError, HttpMethod, RequestBody, RequestOpts};
use crate::listview::ListQuery;

pub fn admins(
    gw: &mut Gateway,
    token: Option<&str>,
    q: &ListQuery,
) -> Result<Page<User>, GatewayError> {
    let body = gw.get("/users/admins", q.to_query_pairs(), token)?;
    page_from_envelope(body, &["admins", "users"])
}

pub fn create(gw: &mut Gateway, token: Option<&str>, payload: Value) -> Result<Value, GatewayError> {
    gw.call(
        HttpMethod::Post,
        "/users",
        Vec::new(),
        RequestBody::Json(payload),
        token,
        &RequestOpts::with_message("User created"),
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
        &format!("/users/{}", id),
        Vec::new(),
        RequestBody::Json(patch),
        token,
        &RequestOpts::default(),
    )
}

pub fn delete(gw: &mut Gateway, token: Option<&str>, id: i64) -> Result<(), GatewayError> {
    gw.call(
        HttpMethod::Delete,
        &format!("/users/{}", id),
        Vec::new(),
        RequestBody::None,
        token,
        &RequestOpts::with_message("User deleted"),
    )?;
    Ok(())
}
