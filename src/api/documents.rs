use serde_json::Value;

use super::types::{Document, Page};
use super::{decode, page_from_envelope, unwrap_entity};
use crate::gateway::{Gateway, GatewayError, HttpMethod, RequestBody, RequestOpts};
use crate::listview::ListQuery;

pub fn list(
    gw: &mut Gateway,
    token: Option<&str>,
    q: &ListQuery,
) -> Result<Page<Document>, GatewayError> {
    let body = gw.get("/documents", q.to_query_pairs(), token)?;
    page_from_envelope(body, &["documents"])
}

pub fn get(gw: &mut Gateway, token: Option<&str>, id: i64) -> Result<Document, GatewayError> {
    let body = gw.get(&format!("/documents/{}", id), Vec::new(), token)?;
    decode(unwrap_entity(body, &["document", "data"]))
}

pub fn create(gw: &mut Gateway, token: Option<&str>, payload: Value) -> Result<Value, GatewayError> {
    gw.call(
        HttpMethod::Post,
        "/documents",
        Vec::new(),
        RequestBody::Json(payload),
        token,
        &RequestOpts::with_message("Document created"),
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
        &format!("/documents/{}", id),
        Vec::new(),
        RequestBody::Json(patch),
        token,
        &RequestOpts::default(),
    )
}

pub fn delete(gw: &mut Gateway, token: Option<&str>, id: i64) -> Result<(), GatewayError> {
    gw.call(
        HttpMethod::Delete,
        &format!("/documents/{}", id),
        Vec::new(),
        RequestBody::None,
        token,
        &RequestOpts::with_message("Document deleted"),
    )?;
    Ok(())
}
