use std::path::PathBuf;
use std::time::Instant;

use chrono::Utc;
use serde_json::json;

use super::{auth_token, gw_err, required_str};
use crate::api;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::listview::SearchDebouncer;
use crate::session::{check_route, GuardDecision, Role, SessionDb, LOGIN_PATH};

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "apiBaseUrl": state.gateway.base_url(),
            "statePath": state.state_dir.as_ref().map(|p| p.to_string_lossy().to_string())
        }),
    )
}

fn handle_state_open(state: &mut AppState, req: &Request) -> serde_json::Value {
    let path = match required_str(req, "path") {
        Ok(v) => PathBuf::from(v),
        Err(e) => return e,
    };
    match SessionDb::open(&path) {
        Ok(db) => {
            state.session = Some(db);
            state.state_dir = Some(path.clone());
            ok(&req.id, json!({ "statePath": path.to_string_lossy() }))
        }
        Err(e) => err(&req.id, "state_open_failed", format!("{e:?}"), None),
    }
}

fn handle_login(state: &mut AppState, req: &Request) -> serde_json::Value {
    if state.session.is_none() {
        return err(&req.id, "no_state", "open a state directory first", None);
    }
    let email = match required_str(req, "email") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let password = match required_str(req, "password") {
        Ok(v) => v,
        Err(e) => return e,
    };

    let token = match api::auth::login(&mut state.gateway, &email, &password) {
        Ok(t) => t,
        Err(e) => return gw_err(req, e),
    };

    // The role is cached from the authenticated profile, not decoded from
    // token claims. A failed profile fetch still leaves a usable session.
    let (user, role) = match api::auth::me(&mut state.gateway, &token) {
        Ok(u) => {
            let role = u.role_id.and_then(Role::from_id);
            (Some(u), role)
        }
        Err(e) => {
            log::warn!("profile fetch after login failed: {}", e.message);
            (None, None)
        }
    };

    let Some(db) = state.session.as_ref() else {
        return err(&req.id, "no_state", "open a state directory first", None);
    };
    if let Err(e) = db.save(&token, role, Utc::now()) {
        return err(&req.id, "session_store_failed", format!("{e:?}"), None);
    }

    ok(
        &req.id,
        json!({
            "role": role.map(|r| r.as_str()),
            "user": user,
        }),
    )
}

fn handle_logout(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(db) = state.session.as_ref() else {
        return err(&req.id, "no_state", "open a state directory first", None);
    };
    match db.clear() {
        Ok(()) => ok(&req.id, json!({ "ok": true })),
        Err(e) => err(&req.id, "session_store_failed", format!("{e:?}"), None),
    }
}

fn handle_status(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(db) = state.session.as_ref() else {
        return err(&req.id, "no_state", "open a state directory first", None);
    };
    let now = Utc::now();
    match db.current() {
        Ok(Some(rec)) => ok(
            &req.id,
            json!({
                "authenticated": !rec.expired(now),
                "role": rec.role.map(|r| r.as_str()),
                "expiresAt": rec.expires_at.to_rfc3339(),
            }),
        ),
        Ok(None) => ok(
            &req.id,
            json!({ "authenticated": false, "role": null, "expiresAt": null }),
        ),
        Err(e) => err(&req.id, "session_store_failed", format!("{e:?}"), None),
    }
}

fn handle_me(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(token) = auth_token(state) else {
        return err(&req.id, "not_authenticated", "no live session", None);
    };
    match api::auth::me(&mut state.gateway, &token) {
        Ok(user) => ok(&req.id, json!({ "user": user })),
        Err(e) => gw_err(req, e),
    }
}

fn handle_set_password(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(token) = auth_token(state) else {
        return err(&req.id, "not_authenticated", "no live session", None);
    };
    let password = match required_str(req, "password") {
        Ok(v) => v,
        Err(e) => return e,
    };
    match api::auth::set_password(&mut state.gateway, &token, &password) {
        Ok(()) => ok(&req.id, json!({ "ok": true })),
        Err(e) => gw_err(req, e),
    }
}

fn handle_recover_password(state: &mut AppState, req: &Request) -> serde_json::Value {
    let email = match required_str(req, "email") {
        Ok(v) => v,
        Err(e) => return e,
    };
    match api::auth::recover_password(&mut state.gateway, &email) {
        Ok(()) => ok(&req.id, json!({ "ok": true })),
        Err(e) => gw_err(req, e),
    }
}

fn handle_guard_check(state: &mut AppState, req: &Request) -> serde_json::Value {
    let path = match required_str(req, "path") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let record = state
        .session
        .as_ref()
        .and_then(|db| db.current().ok())
        .flatten();
    let decision = check_route(&path, record.as_ref(), Utc::now());
    let body = match decision {
        GuardDecision::Allow => json!({ "decision": "allow" }),
        GuardDecision::RedirectToLogin => {
            json!({ "decision": "redirect", "to": LOGIN_PATH })
        }
        GuardDecision::RedirectTo(to) => json!({ "decision": "redirect", "to": to }),
    };
    ok(&req.id, body)
}

fn handle_search_input(state: &mut AppState, req: &Request) -> serde_json::Value {
    let view = match required_str(req, "view") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let term = req
        .params
        .get("term")
        .and_then(|v| v.as_str())
        .unwrap_or("");
    state
        .debouncers
        .entry(view)
        .or_insert_with(SearchDebouncer::new)
        .submit(term, Instant::now());
    ok(
        &req.id,
        json!({ "pending": true, "debounceMs": crate::listview::SEARCH_DEBOUNCE.as_millis() as u64 }),
    )
}

fn handle_search_poll(state: &mut AppState, req: &Request) -> serde_json::Value {
    let view = match required_str(req, "view") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let term = state
        .debouncers
        .get_mut(&view)
        .and_then(|d| d.poll(Instant::now()));
    ok(&req.id, json!({ "term": term }))
}

fn handle_search_flush(state: &mut AppState, req: &Request) -> serde_json::Value {
    let view = match required_str(req, "view") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let term = state.debouncers.get_mut(&view).and_then(|d| d.flush());
    ok(&req.id, json!({ "term": term }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "state.open" => Some(handle_state_open(state, req)),
        "session.login" => Some(handle_login(state, req)),
        "session.logout" => Some(handle_logout(state, req)),
        "session.status" => Some(handle_status(state, req)),
        "session.me" => Some(handle_me(state, req)),
        "session.setPassword" => Some(handle_set_password(state, req)),
        "session.recoverPassword" => Some(handle_recover_password(state, req)),
        "guard.check" => Some(handle_guard_check(state, req)),
        "search.input" => Some(handle_search_input(state, req)),
        "search.poll" => Some(handle_search_poll(state, req)),
        "search.flush" => Some(handle_search_flush(state, req)),
        _ => None,
    }
}
