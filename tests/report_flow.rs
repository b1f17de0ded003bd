mod common;

use serde_json::json;

use common::{call, call_ok, error_code, state_with, FakeTransport};

fn student_with_careers(careers: serde_json::Value) -> serde_json::Value {
    json!({
        "id": 7,
        "dni": "40111222",
        "user": { "id": 70, "email": "ana@example.edu", "name": "Ana", "lastName": "Suarez" },
        "careers": careers,
    })
}

fn two_active_careers() -> serde_json::Value {
    json!([
        { "careerId": 1, "name": "Mathematics", "active": true },
        { "careerId": 2, "name": "Physics", "active": true },
        { "careerId": 3, "name": "Chemistry", "active": false },
    ])
}

#[test]
fn start_reports_active_careers_and_selector_requirement() {
    let transport = FakeTransport::new().expect(
        "GET",
        "/students/7",
        200,
        student_with_careers(two_active_careers()),
    );
    let mut state = state_with(transport);

    let result = call_ok(
        &mut state,
        "reports.start",
        json!({ "meetingId": 3, "studentId": 7 }),
    );
    assert_eq!(result["careerRequired"], json!(true));
    let active = result["activeCareers"].as_array().expect("active careers");
    assert_eq!(active.len(), 2);
    assert!(result["warning"].as_str().is_some());
}

#[test]
fn empty_topics_never_reach_the_network() {
    // Only the duplicate check and the career fetch are scripted; a create
    // POST would trip the transport.
    let transport = FakeTransport::new()
        .expect("GET", "/reports/meeting/3", 404, json!({ "message": "not found" }))
        .expect("GET", "/students/7", 200, student_with_careers(two_active_careers()));
    let mut state = state_with(transport);

    let resp = call(
        &mut state,
        "reports.submit",
        json!({ "meetingId": 3, "studentId": 7, "topics": "   " }),
    );
    assert_eq!(resp["ok"], json!(false));
    assert_eq!(error_code(&resp), "validation_failed");
}

#[test]
fn multi_career_submit_requires_a_choice() {
    let transport = FakeTransport::new()
        .expect("GET", "/reports/meeting/3", 404, json!({ "message": "not found" }))
        .expect("GET", "/students/7", 200, student_with_careers(two_active_careers()));
    let mut state = state_with(transport);

    let resp = call(
        &mut state,
        "reports.submit",
        json!({ "meetingId": 3, "studentId": 7, "topics": "Derivatives review" }),
    );
    assert_eq!(error_code(&resp), "validation_failed");
    assert_eq!(
        resp["error"]["message"],
        "Select one of the student's active careers"
    );
}

#[test]
fn valid_draft_stops_at_confirmation_until_confirmed() {
    let transport = FakeTransport::new()
        .expect("GET", "/reports/meeting/3", 404, json!({ "message": "not found" }))
        .expect("GET", "/students/7", 200, student_with_careers(two_active_careers()));
    let mut state = state_with(transport);

    let result = call_ok(
        &mut state,
        "reports.submit",
        json!({
            "meetingId": 3,
            "studentId": 7,
            "topics": "Derivatives review",
            "careerId": 2
        }),
    );
    assert_eq!(result["needsConfirm"], json!(true));
    assert!(result["warning"].as_str().unwrap().contains("permanent"));
}

#[test]
fn confirmed_submit_posts_and_completes_the_meeting() {
    let transport = FakeTransport::new()
        .expect("GET", "/reports/meeting/3", 404, json!({ "message": "not found" }))
        .expect("GET", "/students/7", 200, student_with_careers(two_active_careers()))
        .expect(
            "POST",
            "/reports",
            201,
            json!({ "id": 91, "meetingId": 3, "topicos": "Derivatives review", "careerId": 2 }),
        );
    let log = transport.log_handle();
    let mut state = state_with(transport);

    let result = call_ok(
        &mut state,
        "reports.submit",
        json!({
            "meetingId": 3,
            "studentId": 7,
            "topics": "Derivatives review",
            "comments": "good session",
            "careerId": 2,
            "confirm": true
        }),
    );
    assert_eq!(result["displayStatus"], "COMPLETED");
    assert_eq!(result["report"]["id"], 91);

    // The wire payload keeps the backend's legacy field name.
    let log = log.lock().unwrap();
    let post = log.last().expect("create request");
    match &post.body {
        tutordeskd::gateway::RequestBody::Json(v) => {
            assert_eq!(v["topicos"], "Derivatives review");
            assert_eq!(v["careerId"], 2);
        }
        other => panic!("expected json body, got {:?}", other),
    }
}

#[test]
fn single_active_career_is_implied_without_a_selector() {
    let careers = json!([
        { "careerId": 3, "name": "Chemistry", "active": false },
        { "careerId": 1, "name": "Mathematics", "active": true },
    ]);
    let transport = FakeTransport::new()
        .expect("GET", "/reports/meeting/4", 404, json!({ "message": "not found" }))
        .expect("GET", "/students/7", 200, student_with_careers(careers))
        .expect("POST", "/reports", 201, json!({ "id": 92, "meetingId": 4, "topicos": "Limits" }));
    let log = transport.log_handle();
    let mut state = state_with(transport);

    call_ok(
        &mut state,
        "reports.submit",
        json!({ "meetingId": 4, "studentId": 7, "topics": "Limits", "confirm": true }),
    );
    let log = log.lock().unwrap();
    match &log.last().expect("create request").body {
        tutordeskd::gateway::RequestBody::Json(v) => assert_eq!(v["careerId"], 1),
        other => panic!("expected json body, got {:?}", other),
    }
}

#[test]
fn existing_report_blocks_recreation() {
    let transport = FakeTransport::new().expect(
        "GET",
        "/reports/meeting/3",
        200,
        json!({ "id": 91, "meetingId": 3, "topicos": "Derivatives review" }),
    );
    let mut state = state_with(transport);

    let resp = call(
        &mut state,
        "reports.submit",
        json!({ "meetingId": 3, "studentId": 7, "topics": "again", "confirm": true }),
    );
    assert_eq!(error_code(&resp), "report_exists");
}

#[test]
fn no_update_method_exists_for_reports() {
    let mut state = state_with(FakeTransport::new());
    for method in ["reports.update", "reports.edit", "reports.patch"] {
        let resp = call(&mut state, method, json!({ "reportId": 91 }));
        assert_eq!(error_code(&resp), "not_implemented", "{}", method);
    }
}

#[test]
fn deleting_a_report_reverts_the_meeting() {
    let transport = FakeTransport::new().expect("DELETE", "/reports/91", 200, json!({}));
    let mut state = state_with(transport);

    let result = call_ok(&mut state, "reports.delete", json!({ "reportId": 91 }));
    assert_eq!(result["meetingStatus"], "REPORTMISSING");
}
