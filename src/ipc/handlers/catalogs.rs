use serde_json::json;

use super::{auth_token, gw_err, object_param, required_i64};
use crate::api;
use crate::ipc::error::ok;
use crate::ipc::types::{AppState, Request};

// Careers, countries and departments back the form selectors; they are
// small and unpaginated.

fn handle_careers_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let token = auth_token(state);
    match api::catalogs::careers(&mut state.gateway, token.as_deref()) {
        Ok(careers) => ok(&req.id, json!({ "careers": careers })),
        Err(e) => gw_err(req, e),
    }
}

fn handle_careers_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let id = match required_i64(req, "careerId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let token = auth_token(state);
    match api::catalogs::career(&mut state.gateway, token.as_deref(), id) {
        Ok(career) => ok(&req.id, json!({ "career": career })),
        Err(e) => gw_err(req, e),
    }
}

fn handle_careers_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let payload = match object_param(req, "career") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let token = auth_token(state);
    match api::catalogs::career_create(&mut state.gateway, token.as_deref(), payload) {
        Ok(body) => ok(&req.id, json!({ "created": body })),
        Err(e) => gw_err(req, e),
    }
}

fn handle_countries_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let token = auth_token(state);
    match api::catalogs::countries(&mut state.gateway, token.as_deref()) {
        Ok(countries) => ok(&req.id, json!({ "countries": countries })),
        Err(e) => gw_err(req, e),
    }
}

fn handle_departments_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let token = auth_token(state);
    match api::catalogs::departments(&mut state.gateway, token.as_deref()) {
        Ok(departments) => ok(&req.id, json!({ "departments": departments })),
        Err(e) => gw_err(req, e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "careers.list" => Some(handle_careers_list(state, req)),
        "careers.get" => Some(handle_careers_get(state, req)),
        "careers.create" => Some(handle_careers_create(state, req)),
        "countries.list" => Some(handle_countries_list(state, req)),
        "departments.list" => Some(handle_departments_list(state, req)),
        _ => None,
    }
}
