pub mod auth;
pub mod catalogs;
pub mod documents;
pub mod meetings;
pub mod reports;
pub mod students;
pub mod tutors;
pub mod types;
pub mod users;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::gateway::GatewayError;
use types::Page;

pub(crate) fn decode_error(e: impl std::fmt::Display) -> GatewayError {
    GatewayError {
        code: "bad_payload".to_string(),
        message: format!("backend payload unreadable: {}", e),
        status: None,
    }
}

pub(crate) fn decode<T: DeserializeOwned>(v: Value) -> Result<T, GatewayError> {
    serde_json::from_value(v).map_err(decode_error)
}

/// Some endpoints wrap a single entity (`{user: {..}}`, `{data: {..}}`),
/// others answer it bare. Unwrap once, here.
pub(crate) fn unwrap_entity(mut v: Value, keys: &[&str]) -> Value {
    if let Value::Object(map) = &mut v {
        for k in keys {
            if let Some(inner) = map.remove(*k) {
                if inner.is_object() || inner.is_array() {
                    return inner;
                }
            }
        }
    }
    v
}

/// Normalizes the backend's three list envelopes (`{<resource>, totalCount}`,
/// `{data, total}`, bare array) into one `Page {items, total}`. This is the
/// only place response shapes are sniffed.
pub(crate) fn page_from_envelope<T: DeserializeOwned>(
    v: Value,
    item_keys: &[&str],
) -> Result<Page<T>, GatewayError> {
    match v {
        Value::Array(items) => {
            let total = items.len() as i64;
            let items = decode(Value::Array(items))?;
            Ok(Page { items, total })
        }
        Value::Object(mut map) => {
            let total = ["totalCount", "total", "count"]
                .iter()
                .find_map(|k| map.get(*k).and_then(|v| v.as_i64()));
            let raw_items = item_keys
                .iter()
                .chain(["data", "items"].iter())
                .find_map(|k| map.remove(*k));
            let Some(raw_items) = raw_items else {
                return Err(decode_error("list envelope carries no items array"));
            };
            let items: Vec<T> = decode(raw_items)?;
            let total = total.unwrap_or(items.len() as i64);
            Ok(Page { items, total })
        }
        other => Err(decode_error(format!(
            "expected a list envelope, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn page_accepts_all_three_envelopes() {
        let named = json!({ "students": [1, 2, 3], "totalCount": 23 });
        let p: Page<i64> = page_from_envelope(named, &["students"]).unwrap();
        assert_eq!((p.items.len(), p.total), (3, 23));

        let generic = json!({ "data": [1], "total": 9 });
        let p: Page<i64> = page_from_envelope(generic, &["students"]).unwrap();
        assert_eq!((p.items.len(), p.total), (1, 9));

        let bare = json!([1, 2]);
        let p: Page<i64> = page_from_envelope(bare, &["students"]).unwrap();
        assert_eq!((p.items.len(), p.total), (2, 2));
    }

    #[test]
    fn page_rejects_scalar_body() {
        let res: Result<Page<i64>, _> = page_from_envelope(json!(7), &["students"]);
        assert!(res.is_err());
    }
}
