use serde_json::{json, Value};

use super::types::{Page, Student, Tutor};
use super::{decode, page_from_envelope, unwrap_entity};
use crate::gateway::{Gateway, GatewayError, HttpMethod, RequestBody, RequestOpts};
use crate::listview::ListQuery;

pub fn list(
    gw: &mut Gateway,
    token: Option<&str>,
    q: &ListQuery,
) -> Result<Page<Tutor>, GatewayError> {
    let body = gw.get("/tutors", q.to_query_pairs(), token)?;
    page_from_envelope(body, &["tutors"])
}

pub fn get(gw: &mut Gateway, token: Option<&str>, id: i64) -> Result<Tutor, GatewayError> {
    let body = gw.get(&format!("/tutors/{}", id), Vec::new(), token)?;
    decode(unwrap_entity(body, &["tutor", "data"]))
}

pub fn create(gw: &mut Gateway, token: Option<&str>, payload: Value) -> Result<Value, GatewayError> {
    gw.call(
        HttpMethod::Post,
        "/tutors",
        Vec::new(),
        RequestBody::Json(payload),
        token,
        &RequestOpts::with_message("Tutor created"),
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
        &format!("/tutors/{}", id),
        Vec::new(),
        RequestBody::Json(patch),
        token,
        &RequestOpts::default(),
    )
}

pub fn delete(gw: &mut Gateway, token: Option<&str>, id: i64) -> Result<(), GatewayError> {
    gw.call(
        HttpMethod::Delete,
        &format!("/tutors/{}", id),
        Vec::new(),
        RequestBody::None,
        token,
        &RequestOpts::with_message("Tutor deleted"),
    )?;
    Ok(())
}

/// Students currently assigned to this tutor.
pub fn students(
    gw: &mut Gateway,
    token: Option<&str>,
    tutor_id: i64,
) -> Result<Vec<Student>, GatewayError> {
    let body = gw.get(&format!("/tutors/get-students/{}", tutor_id), Vec::new(), token)?;
    Ok(page_from_envelope(body, &["students"])?.items)
}

/// The tutorship join has no entity of its own; assignment goes through
/// dedicated endpoints on the users surface.
pub fn assign(
    gw: &mut Gateway,
    token: Option<&str>,
    tutor_id: i64,
    student_ids: &[i64],
) -> Result<(), GatewayError> {
    gw.call(
        HttpMethod::Post,
        "/users/create-assignment",
        Vec::new(),
        RequestBody::Json(json!({ "tutorId": tutor_id, "studentIds": student_ids })),
        token,
        &RequestOpts::with_message("Students assigned"),
    )?;
    Ok(())
}

pub fn unassign(
    gw: &mut Gateway,
    token: Option<&str>,
    tutor_id: i64,
    student_ids: &[i64],
) -> Result<(), GatewayError> {
    gw.call(
        HttpMethod::Delete,
        "/users/delete-assignment",
        Vec::new(),
        RequestBody::Json(json!({ "tutorId": tutor_id, "studentIds": student_ids })),
        token,
        &RequestOpts::with_message("Assignment removed"),
    )?;
    Ok(())
}
