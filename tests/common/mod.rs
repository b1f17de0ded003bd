#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use tutordeskd::gateway::{Gateway, HttpRequest, HttpResponse, Transport, TransportError};
use tutordeskd::ipc::{handle_request, AppState, Request};
use tutordeskd::session::SessionDb;

pub const BASE_URL: &str = "http://backend.test";

struct Expectation {
    method: String,
    path: String,
    status: u16,
    body: Value,
}

/// Scripted transport: each expectation is consumed in order and checked
/// against the outgoing request. Unexpected traffic fails as a transport
/// error carrying a loud message.
pub struct FakeTransport {
    script: VecDeque<Expectation>,
    log: Arc<Mutex<Vec<HttpRequest>>>,
}

impl FakeTransport {
    pub fn new() -> FakeTransport {
        FakeTransport {
            script: VecDeque::new(),
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn expect(mut self, method: &str, path: &str, status: u16, body: Value) -> FakeTransport {
        self.script.push_back(Expectation {
            method: method.to_string(),
            path: path.to_string(),
            status,
            body,
        });
        self
    }

    pub fn log_handle(&self) -> Arc<Mutex<Vec<HttpRequest>>> {
        Arc::clone(&self.log)
    }
}

impl Transport for FakeTransport {
    fn execute(&mut self, req: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.log.lock().expect("log lock").push(req.clone());
        let Some(exp) = self.script.pop_front() else {
            return Err(TransportError {
                message: format!("unexpected request: {} {}", req.method.as_str(), req.url),
            });
        };
        assert_eq!(
            req.method.as_str(),
            exp.method,
            "wrong verb for {}",
            req.url
        );
        assert_eq!(
            req.url,
            format!("{}{}", BASE_URL, exp.path),
            "wrong path, expected {}",
            exp.path
        );
        Ok(HttpResponse {
            status: exp.status,
            body: exp.body,
        })
    }
}

/// AppState over a scripted transport, with an in-memory session store so
/// auth-dependent handlers work without touching the filesystem.
pub fn state_with(transport: FakeTransport) -> AppState {
    let gateway = Gateway::new(BASE_URL, Box::new(transport));
    let mut state = AppState::new(gateway);
    state.session = Some(SessionDb::open_in_memory().expect("in-memory session db"));
    state
}

pub fn call(state: &mut AppState, method: &str, params: Value) -> Value {
    handle_request(
        state,
        Request {
            id: "t-1".to_string(),
            method: method.to_string(),
            params,
        },
    )
}

pub fn call_ok(state: &mut AppState, method: &str, params: Value) -> Value {
    let resp = call(state, method, params);
    assert_eq!(
        resp.get("ok"),
        Some(&json!(true)),
        "expected ok for {}: {}",
        method,
        resp
    );
    resp.get("result").cloned().unwrap_or(Value::Null)
}

pub fn error_code(resp: &Value) -> &str {
    resp.get("error")
        .and_then(|e| e.get("code"))
        .and_then(|v| v.as_str())
        .unwrap_or("")
}

pub fn notices(resp: &Value) -> Vec<Value> {
    resp.get("notices")
        .and_then(|v| v.as_array())
        .cloned()
        .unwrap_or_default()
}
