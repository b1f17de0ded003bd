mod common;

use serde_json::json;

use common::{call, call_ok, notices, state_with, FakeTransport};

#[test]
fn mutating_call_attaches_a_success_notice() {
    let transport =
        FakeTransport::new().expect("POST", "/students", 201, json!({ "id": 11, "dni": "1" }));
    let mut state = state_with(transport);

    let resp = call(
        &mut state,
        "students.create",
        json!({ "student": { "dni": "1", "email": "x@example.edu" } }),
    );
    assert_eq!(resp["ok"], json!(true));
    let n = notices(&resp);
    assert_eq!(n.len(), 1);
    assert_eq!(n[0]["level"], "success");
    assert_eq!(n[0]["message"], "Student created");
    assert!(n[0]["id"].as_str().is_some());
}

#[test]
fn reads_stay_quiet() {
    let transport = FakeTransport::new().expect(
        "GET",
        "/students",
        200,
        json!({ "students": [], "totalCount": 0 }),
    );
    let mut state = state_with(transport);
    let resp = call(&mut state, "students.list", json!({}));
    assert_eq!(resp["ok"], json!(true));
    assert!(notices(&resp).is_empty());
}

#[test]
fn failure_notice_carries_the_extracted_message() {
    let transport = FakeTransport::new().expect(
        "DELETE",
        "/students/11",
        409,
        json!({ "errors": { "tutorships": ["student still has an active tutorship"] } }),
    );
    let mut state = state_with(transport);

    let resp = call(&mut state, "students.delete", json!({ "studentId": 11 }));
    assert_eq!(resp["ok"], json!(false));
    assert_eq!(
        resp["error"]["message"],
        "student still has an active tutorship"
    );
    let n = notices(&resp);
    assert_eq!(n.len(), 1);
    assert_eq!(n[0]["level"], "error");
    assert_eq!(n[0]["message"], "student still has an active tutorship");
}

#[test]
fn unreadable_error_body_falls_back_to_the_generic_message() {
    let transport =
        FakeTransport::new().expect("DELETE", "/students/11", 500, json!({ "status": 500 }));
    let mut state = state_with(transport);

    let resp = call(&mut state, "students.delete", json!({ "studentId": 11 }));
    assert_eq!(
        resp["error"]["message"],
        "Unexpected error, please try again."
    );
}

#[test]
fn notices_reset_between_requests() {
    let transport = FakeTransport::new()
        .expect("POST", "/students", 201, json!({ "id": 11 }))
        .expect("GET", "/students", 200, json!({ "students": [], "totalCount": 0 }));
    let mut state = state_with(transport);

    let first = call(
        &mut state,
        "students.create",
        json!({ "student": { "dni": "1" } }),
    );
    assert_eq!(notices(&first).len(), 1);

    let second = call(&mut state, "students.list", json!({}));
    assert!(notices(&second).is_empty());
}

#[test]
fn silent_duplicate_probe_emits_no_error_notice() {
    // The pre-create report lookup answers 404 without a toast; only the
    // create's own success notice comes back.
    let transport = FakeTransport::new()
        .expect("GET", "/reports/meeting/3", 404, json!({ "message": "not found" }))
        .expect(
            "GET",
            "/students/7",
            200,
            json!({
                "id": 7,
                "user": { "id": 70, "email": "ana@example.edu" },
                "careers": [{ "careerId": 1, "name": "Mathematics", "active": true }]
            }),
        )
        .expect("POST", "/reports", 201, json!({ "id": 91, "meetingId": 3, "topicos": "Limits" }));
    let mut state = state_with(transport);

    let resp = call(
        &mut state,
        "reports.submit",
        json!({ "meetingId": 3, "studentId": 7, "topics": "Limits", "confirm": true }),
    );
    assert_eq!(resp["ok"], json!(true));
    let n = notices(&resp);
    assert_eq!(n.len(), 1);
    assert_eq!(n[0]["level"], "success");
    assert_eq!(n[0]["message"], "Report filed");
}

#[test]
fn network_failure_is_a_distinct_code_with_a_notice() {
    // Empty script: any request comes back as a transport error.
    let mut state = state_with(FakeTransport::new());
    let resp = call(&mut state, "students.list", json!({}));
    assert_eq!(resp["error"]["code"], "network_error");
    assert_eq!(notices(&resp)[0]["level"], "error");
    let _ = call_ok(&mut state, "health", json!({}));
}
