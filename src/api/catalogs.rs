use serde_json::Value;

use super::types::{Career, Country, Department};
use super::{decode, page_from_envelope, unwrap_entity};
use crate::gateway::{Gateway, GatewayError, HttpMethod, RequestBody, RequestOpts};

// Catalog endpoints keep their legacy Spanish path segments.

pub fn careers(gw: &mut Gateway, token: Option<&str>) -> Result<Vec<Career>, GatewayError> {
    let body = gw.get("/careers/carreras", Vec::new(), token)?;
    Ok(page_from_envelope(body, &["careers", "carreras"])?.items)
}

pub fn career(gw: &mut Gateway, token: Option<&str>, id: i64) -> Result<Career, GatewayError> {
    let body = gw.get(&format!("/careers/{}", id), Vec::new(), token)?;
    decode(unwrap_entity(body, &["career", "data"]))
}

pub fn career_create(
    gw: &mut Gateway,
    token: Option<&str>,
    payload: Value,
) -> Result<Value, GatewayError> {
    gw.call(
        HttpMethod::Post,
        "/careers",
        Vec::new(),
        RequestBody::Json(payload),
        token,
        &RequestOpts::with_message("Career created"),
    )
}

pub fn countries(gw: &mut Gateway, token: Option<&str>) -> Result<Vec<Country>, GatewayError> {
    let body = gw.get("/countries/paises", Vec::new(), token)?;
    Ok(page_from_envelope(body, &["countries", "paises"])?.items)
}

pub fn departments(gw: &mut Gateway, token: Option<&str>) -> Result<Vec<Department>, GatewayError> {
    let body = gw.get("/departments", Vec::new(), token)?;
    Ok(page_from_envelope(body, &["departments"])?.items)
}
