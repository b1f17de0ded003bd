use serde_json::Value;

use super::types::{Page, Student, SubjectCareerWithState};
use super::{decode, page_from_envelope, unwrap_entity};
use crate::gateway::{Gateway, GatewayError, HttpMethod, RequestBody, RequestOpts};
use crate::listview::ListQuery;

pub fn list(
    gw: &mut Gateway,
    token: Option<&str>,
    q: &ListQuery,
) -> Result<Page<Student>, GatewayError> {
    let body = gw.get("/students", q.to_query_pairs(), token)?;
    page_from_envelope(body, &["students"])
}

pub fn without_tutor(gw: &mut Gateway, token: Option<&str>) -> Result<Vec<Student>, GatewayError> {
    let body = gw.get("/students/without-tutor", Vec::new(), token)?;
    Ok(page_from_envelope(body, &["students"])?.items)
}

pub fn get(gw: &mut Gateway, token: Option<&str>, id: i64) -> Result<Student, GatewayError> {
    let body = gw.get(&format!("/students/{}", id), Vec::new(), token)?;
    decode(unwrap_entity(body, &["student", "data"]))
}

pub fn create(gw: &mut Gateway, token: Option<&str>, payload: Value) -> Result<Value, GatewayError> {
    gw.call(
        HttpMethod::Post,
        "/students",
        Vec::new(),
        RequestBody::Json(payload),
        token,
        &RequestOpts::with_message("Student created"),
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
        &format!("/students/{}", id),
        Vec::new(),
        RequestBody::Json(patch),
        token,
        &RequestOpts::default(),
    )
}

/// The profile-modal variant patches a reduced field set through its own
/// endpoint.
pub fn update_profile(
    gw: &mut Gateway,
    token: Option<&str>,
    id: i64,
    patch: Value,
) -> Result<Value, GatewayError> {
    gw.call(
        HttpMethod::Patch,
        &format!("/students/updateStudentModal/{}", id),
        Vec::new(),
        RequestBody::Json(patch),
        token,
        &RequestOpts::default(),
    )
}

pub fn delete(gw: &mut Gateway, token: Option<&str>, id: i64) -> Result<(), GatewayError> {
    gw.call(
        HttpMethod::Delete,
        &format!("/students/{}", id),
        Vec::new(),
        RequestBody::None,
        token,
        &RequestOpts::with_message("Student deleted"),
    )?;
    Ok(())
}

/// Subject states for one student + career pair.
pub fn subjects(
    gw: &mut Gateway,
    token: Option<&str>,
    student_id: i64,
    career_id: i64,
) -> Result<Vec<SubjectCareerWithState>, GatewayError> {
    let body = gw.get(
        &format!("/students/subjects/{}/{}", student_id, career_id),
        Vec::new(),
        token,
    )?;
    Ok(page_from_envelope(body, &["subjects"])?.items)
}

pub fn change_subject_state(
    gw: &mut Gateway,
    token: Option<&str>,
    student_id: i64,
    payload: Value,
) -> Result<Value, GatewayError> {
    gw.call(
        HttpMethod::Patch,
        &format!("/students/changeSubjectState/{}", student_id),
        Vec::new(),
        RequestBody::Json(payload),
        token,
        &RequestOpts::with_message("Subject state updated"),
    )
}

/// Bulk roster import; the daemon reads the file, the backend parses it.
pub fn upload(
    gw: &mut Gateway,
    token: Option<&str>,
    file_name: &str,
    bytes: Vec<u8>,
) -> Result<Value, GatewayError> {
    gw.call(
        HttpMethod::Post,
        "/students/upload-students",
        Vec::new(),
        RequestBody::FileUpload {
            field: "file".to_string(),
            file_name: file_name.to_string(),
            bytes,
        },
        token,
        &RequestOpts::with_message("Students imported"),
    )
}
