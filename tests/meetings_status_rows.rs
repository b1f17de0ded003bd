mod common;

use chrono::{Duration, Utc};
use serde_json::json;

use common::{call, call_ok, error_code, state_with, FakeTransport};

fn meeting(id: i64, date: &str, time: &str, status: &str, report: Option<serde_json::Value>) -> serde_json::Value {
    json!({
        "id": id,
        "date": date,
        "time": time,
        "location": "Room 4",
        "status": status,
        "tutorship": { "student": { "id": 7, "name": "Ana", "lastName": "Suarez" }, "tutorId": 3 },
        "report": report,
    })
}

fn future_date() -> String {
    (Utc::now() + Duration::days(30)).format("%Y-%m-%d").to_string()
}

fn past_date() -> String {
    (Utc::now() - Duration::days(30)).format("%Y-%m-%d").to_string()
}

#[test]
fn rows_carry_derived_status_and_gated_actions() {
    let transport = FakeTransport::new().expect(
        "GET",
        "/meetings",
        200,
        json!({
            "meetings": [
                meeting(1, &future_date(), "10:00", "PENDING", None),
                meeting(2, &past_date(), "10:00", "PENDING", None),
                meeting(3, &past_date(), "10:00", "PENDING", Some(json!({
                    "id": 91, "meetingId": 3, "topicos": "Derivatives review"
                }))),
            ],
            "totalCount": 3
        }),
    );
    let mut state = state_with(transport);

    let result = call_ok(&mut state, "meetings.list", json!({ "page": 1, "pageSize": 10 }));
    let rows = result["meetings"].as_array().expect("rows");
    assert_eq!(rows.len(), 3);

    assert_eq!(rows[0]["displayStatus"], "PENDING");
    assert_eq!(rows[0]["actions"], json!(["edit", "delete"]));

    // Elapsed schedule without a report demands one.
    assert_eq!(rows[1]["displayStatus"], "REPORTMISSING");
    assert_eq!(rows[1]["actions"], json!(["edit", "delete", "createReport"]));
    assert_eq!(rows[1]["badge"], "Report missing");

    // A filed report completes the meeting; only view remains.
    assert_eq!(rows[2]["displayStatus"], "COMPLETED");
    assert_eq!(rows[2]["actions"], json!(["edit", "delete", "viewReport"]));

    let meta = &result["pageMeta"];
    assert_eq!(meta["totalPages"], 1);
    assert_eq!(meta["hasNext"], false);
}

#[test]
fn backend_computed_status_is_trusted_over_local_clock() {
    let mut row = meeting(5, &past_date(), "08:00", "PENDING", None);
    row["computedStatus"] = json!("PENDING");
    let transport =
        FakeTransport::new().expect("GET", "/meetings", 200, json!({ "meetings": [row], "totalCount": 1 }));
    let mut state = state_with(transport);

    let result = call_ok(&mut state, "meetings.list", json!({}));
    assert_eq!(result["meetings"][0]["displayStatus"], "PENDING");
}

#[test]
fn my_meetings_variant_hits_its_own_endpoint() {
    let transport = FakeTransport::new().expect(
        "GET",
        "/meetings/my-meetings",
        200,
        json!({ "meetings": [], "totalCount": 0 }),
    );
    let mut state = state_with(transport);
    let result = call_ok(&mut state, "meetings.list", json!({ "mine": true }));
    assert_eq!(result["meetings"], json!([]));
    assert_eq!(result["pageMeta"]["totalPages"], 1);
}

#[test]
fn failed_fetch_surfaces_backend_message() {
    let transport = FakeTransport::new().expect(
        "GET",
        "/meetings",
        500,
        json!({ "message": "database unavailable" }),
    );
    let mut state = state_with(transport);
    let resp = call(&mut state, "meetings.list", json!({}));
    assert_eq!(resp["ok"], json!(false));
    assert_eq!(error_code(&resp), "backend_error");
    assert_eq!(resp["error"]["message"], "database unavailable");
}
