use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

pub const GENERIC_ERROR: &str = "Unexpected error, please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    pub fn is_mutating(self) -> bool {
        !matches!(self, HttpMethod::Get)
    }
}

#[derive(Debug, Clone)]
pub enum RequestBody {
    None,
    Json(Value),
    /// Multipart file upload; the daemon reads the bytes, the transport
    /// builds the form.
    FileUpload {
        field: String,
        file_name: String,
        bytes: Vec<u8>,
    },
}

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub bearer: Option<String>,
    pub request_id: String,
    pub body: RequestBody,
}

/// Backend response with the body already decoded: JSON where possible, a
/// bare string body carried as a JSON string, an empty body as null.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Value,
}

#[derive(Debug, Clone)]
pub struct TransportError {
    pub message: String,
}

pub trait Transport {
    fn execute(&mut self, req: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Production transport over a blocking reqwest client.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> anyhow::Result<HttpTransport> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;
        Ok(HttpTransport { client })
    }
}

impl Transport for HttpTransport {
    fn execute(&mut self, req: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = reqwest::Method::from_bytes(req.method.as_str().as_bytes())
            .map_err(|e| TransportError { message: e.to_string() })?;
        let mut builder = self
            .client
            .request(method, &req.url)
            .header("X-Request-Id", &req.request_id)
            .query(&req.query);
        if let Some(token) = &req.bearer {
            builder = builder.bearer_auth(token);
        }
        builder = match &req.body {
            RequestBody::None => builder,
            RequestBody::Json(v) => builder.json(v),
            RequestBody::FileUpload {
                field,
                file_name,
                bytes,
            } => {
                let part = reqwest::blocking::multipart::Part::bytes(bytes.clone())
                    .file_name(file_name.clone());
                builder.multipart(reqwest::blocking::multipart::Form::new().part(field.clone(), part))
            }
        };

        let resp = builder
            .send()
            .map_err(|e| TransportError { message: e.to_string() })?;
        let status = resp.status().as_u16();
        let text = resp
            .text()
            .map_err(|e| TransportError { message: e.to_string() })?;
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };
        Ok(HttpResponse { status, body })
    }
}

/// Fire-and-forget toast the shell renders; drained into each IPC response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub id: String,
    pub level: NoticeLevel,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct GatewayError {
    pub code: String,
    pub message: String,
    pub status: Option<u16>,
}

impl GatewayError {
    fn network(message: String) -> GatewayError {
        GatewayError {
            code: "network_error".to_string(),
            message,
            status: None,
        }
    }

    fn backend(status: u16, message: String) -> GatewayError {
        GatewayError {
            code: "backend_error".to_string(),
            message,
            status: Some(status),
        }
    }
}

/// Per-call notification options. Default: success toast on mutating verbs,
/// error toast on any failure.
#[derive(Debug, Clone, Default)]
pub struct RequestOpts {
    pub silent: bool,
    pub success_message: Option<String>,
}

impl RequestOpts {
    pub fn silent() -> RequestOpts {
        RequestOpts {
            silent: true,
            success_message: None,
        }
    }

    pub fn with_message(message: &str) -> RequestOpts {
        RequestOpts {
            silent: false,
            success_message: Some(message.to_string()),
        }
    }
}

/// Single point of HTTP egress: injects the bearer token, tags requests for
/// correlation, emits success/error notices, and extracts readable messages
/// from whatever error shape the backend answers with.
pub struct Gateway {
    base_url: String,
    transport: Box<dyn Transport>,
    notices: Vec<Notice>,
}

impl Gateway {
    pub fn new(base_url: &str, transport: Box<dyn Transport>) -> Gateway {
        Gateway {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            notices: Vec::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn push_notice(&mut self, level: NoticeLevel, message: String) {
        self.notices.push(Notice {
            id: Uuid::new_v4().to_string(),
            level,
            message,
        });
    }

    pub fn get(
        &mut self,
        path: &str,
        query: Vec<(String, String)>,
        token: Option<&str>,
    ) -> Result<Value, GatewayError> {
        self.call(
            HttpMethod::Get,
            path,
            query,
            RequestBody::None,
            token,
            &RequestOpts::default(),
        )
    }

    pub fn call(
        &mut self,
        method: HttpMethod,
        path: &str,
        query: Vec<(String, String)>,
        body: RequestBody,
        token: Option<&str>,
        opts: &RequestOpts,
    ) -> Result<Value, GatewayError> {
        let req = HttpRequest {
            method,
            url: format!("{}{}", self.base_url, path),
            query,
            bearer: token.map(|t| t.to_string()),
            request_id: Uuid::new_v4().to_string(),
            body,
        };
        log::debug!("{} {} [{}]", method.as_str(), req.url, req.request_id);

        let resp = match self.transport.execute(&req) {
            Ok(r) => r,
            Err(e) => {
                let message = if e.message.trim().is_empty() {
                    GENERIC_ERROR.to_string()
                } else {
                    e.message
                };
                log::warn!("{} {} failed: {}", method.as_str(), req.url, message);
                if !opts.silent {
                    self.push_notice(NoticeLevel::Error, message.clone());
                }
                return Err(GatewayError::network(message));
            }
        };

        if resp.status >= 400 {
            let message =
                extract_error_message(&resp.body).unwrap_or_else(|| GENERIC_ERROR.to_string());
            log::warn!(
                "{} {} -> {}: {}",
                method.as_str(),
                req.url,
                resp.status,
                message
            );
            if !opts.silent {
                self.push_notice(NoticeLevel::Error, message.clone());
            }
            return Err(GatewayError::backend(resp.status, message));
        }

        if method.is_mutating() && !opts.silent {
            let message = opts
                .success_message
                .clone()
                .unwrap_or_else(|| default_success_message(method).to_string());
            self.push_notice(NoticeLevel::Success, message);
        }
        Ok(resp.body)
    }
}

fn default_success_message(method: HttpMethod) -> &'static str {
    match method {
        HttpMethod::Post => "Created successfully",
        HttpMethod::Put | HttpMethod::Patch => "Updated successfully",
        HttpMethod::Delete => "Deleted successfully",
        HttpMethod::Get => "Done",
    }
}

/// Walks the backend's known error shapes in a fixed order and returns the
/// first human-readable message found.
pub fn extract_error_message(body: &Value) -> Option<String> {
    match body {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Object(map) => {
            if map.contains_key("title") || map.contains_key("detail") {
                if let Some(detail) = map.get("detail").and_then(|v| v.as_str()) {
                    return Some(detail.to_string());
                }
                if let Some(title) = map.get("title").and_then(|v| v.as_str()) {
                    return Some(title.to_string());
                }
            }
            if let Some(msg) = map.get("message").and_then(|v| v.as_str()) {
                return Some(msg.to_string());
            }
            if let Some(msg) = map.get("error").and_then(|v| v.as_str()) {
                return Some(msg.to_string());
            }
            match map.get("errors") {
                Some(Value::Array(items)) => items
                    .iter()
                    .find_map(|v| v.as_str())
                    .map(|s| s.to_string()),
                Some(Value::Object(fields)) => fields.values().find_map(|v| match v {
                    Value::Array(msgs) => msgs.iter().find_map(|m| m.as_str()).map(|s| s.to_string()),
                    Value::String(s) => Some(s.clone()),
                    _ => None,
                }),
                _ => None,
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extraction_follows_shape_order() {
        assert_eq!(
            extract_error_message(&json!("oops")),
            Some("oops".to_string())
        );
        assert_eq!(
            extract_error_message(&json!({ "title": "Bad Request", "detail": "dni taken" })),
            Some("dni taken".to_string())
        );
        assert_eq!(
            extract_error_message(&json!({ "message": "X" })),
            Some("X".to_string())
        );
        assert_eq!(
            extract_error_message(&json!({ "error": "nope" })),
            Some("nope".to_string())
        );
        assert_eq!(
            extract_error_message(&json!({ "errors": ["first", "second"] })),
            Some("first".to_string())
        );
        assert_eq!(
            extract_error_message(&json!({ "errors": { "email": ["already taken"] } })),
            Some("already taken".to_string())
        );
        assert_eq!(extract_error_message(&json!({ "status": 500 })), None);
    }
}
