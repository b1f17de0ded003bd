pub const API_URL_ENV: &str = "TUTORDESK_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:3001";

/// The one configuration knob: where the REST backend lives.
pub fn api_base_url() -> String {
    std::env::var(API_URL_ENV)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}
