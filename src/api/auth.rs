use serde_json::{json, Value};

use super::{decode, decode_error, unwrap_entity};
use crate::gateway::{Gateway, GatewayError, HttpMethod, RequestBody, RequestOpts};

use super::types::User;

/// Exchanges credentials for a bearer token. The backend answers either a
/// bare token string or `{token}` / `{accessToken}`.
pub fn login(gw: &mut Gateway, email: &str, password: &str) -> Result<String, GatewayError> {
    let body = gw.call(
        HttpMethod::Post,
        "/auth/login",
        Vec::new(),
        RequestBody::Json(json!({ "email": email, "password": password })),
        None,
        &RequestOpts::with_message("Signed in"),
    )?;
    token_from_body(&body).ok_or_else(|| decode_error("login response carries no token"))
}

fn token_from_body(body: &Value) -> Option<String> {
    body.as_str()
        .map(|s| s.to_string())
        .or_else(|| {
            body.get("token")
                .or_else(|| body.get("accessToken"))
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
        })
}

/// Authenticated profile; the role cached at login comes from here, never
/// from locally decoded token claims.
pub fn me(gw: &mut Gateway, token: &str) -> Result<User, GatewayError> {
    let body = gw.get("/auth/get-me", Vec::new(), Some(token))?;
    decode(unwrap_entity(body, &["user", "data"]))
}

pub fn set_password(gw: &mut Gateway, token: &str, password: &str) -> Result<(), GatewayError> {
    gw.call(
        HttpMethod::Post,
        "/auth/set-password",
        Vec::new(),
        RequestBody::Json(json!({ "password": password })),
        Some(token),
        &RequestOpts::with_message("Password updated"),
    )?;
    Ok(())
}

pub fn recover_password(gw: &mut Gateway, email: &str) -> Result<(), GatewayError> {
    gw.call(
        HttpMethod::Post,
        "/auth/recover-password",
        Vec::new(),
        RequestBody::Json(json!({ "email": email })),
        None,
        &RequestOpts::with_message("Recovery email sent"),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn token_shapes() {
        assert_eq!(token_from_body(&json!("tok")), Some("tok".to_string()));
        assert_eq!(
            token_from_body(&json!({ "token": "a" })),
            Some("a".to_string())
        );
        assert_eq!(
            token_from_body(&json!({ "accessToken": "b" })),
            Some("b".to_string())
        );
        assert_eq!(token_from_body(&json!({ "user": {} })), None);
    }
}
