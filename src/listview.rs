use std::time::{Duration, Instant};

use serde::Serialize;
use serde_json::Value;

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Query parameters shared by every paginated list screen. All fields are
/// optional on the wire; absence means "backend default".
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub search: Option<String>,
    pub order_by: Option<String>,
    pub order_dir: Option<OrderDir>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDir {
    Asc,
    Desc,
}

impl OrderDir {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderDir::Asc => "ASC",
            OrderDir::Desc => "DESC",
        }
    }

    pub fn parse(s: &str) -> Option<OrderDir> {
        match s.to_ascii_uppercase().as_str() {
            "ASC" => Some(OrderDir::Asc),
            "DESC" => Some(OrderDir::Desc),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct ListQueryError(pub String);

impl ListQuery {
    /// Parses `{page, pageSize, search, orderBy, orderDir}` from IPC params.
    pub fn from_params(params: &Value) -> Result<ListQuery, ListQueryError> {
        let page = params.get("page").and_then(|v| v.as_i64());
        if let Some(p) = page {
            if p < 1 {
                return Err(ListQueryError(format!("page must be >= 1, got {}", p)));
            }
        }
        let page_size = params.get("pageSize").and_then(|v| v.as_i64());
        if let Some(ps) = page_size {
            if ps < 1 {
                return Err(ListQueryError(format!("pageSize must be >= 1, got {}", ps)));
            }
        }
        let search = params
            .get("search")
            .and_then(|v| v.as_str())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let order_by = params
            .get("orderBy")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());
        let order_dir = match params.get("orderDir").and_then(|v| v.as_str()) {
            Some(raw) => Some(
                OrderDir::parse(raw)
                    .ok_or_else(|| ListQueryError(format!("orderDir must be ASC or DESC, got {}", raw)))?,
            ),
            None => None,
        };
        Ok(ListQuery {
            page,
            page_size,
            search,
            order_by,
            order_dir,
        })
    }

    /// Flattens into query-string pairs for the gateway.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(p) = self.page {
            pairs.push(("page".to_string(), p.to_string()));
        }
        if let Some(ps) = self.page_size {
            pairs.push(("limit".to_string(), ps.to_string()));
        }
        if let Some(s) = &self.search {
            pairs.push(("search".to_string(), s.clone()));
        }
        if let Some(ob) = &self.order_by {
            pairs.push(("orderBy".to_string(), ob.clone()));
            pairs.push((
                "orderDir".to_string(),
                self.order_dir.unwrap_or(OrderDir::Asc).as_str().to_string(),
            ));
        }
        pairs
    }
}

pub fn total_pages(total_items: i64, page_size: i64) -> i64 {
    if page_size <= 0 {
        return 1;
    }
    ((total_items + page_size - 1) / page_size).max(1)
}

/// Pagination block attached to every list view-model.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: i64,
    pub page_size: i64,
    pub total_items: i64,
    pub total_pages: i64,
    pub has_prev: bool,
    pub has_next: bool,
}

impl PageMeta {
    /// Rejects page numbers outside `[1, totalPages]`; the shell disables
    /// its first/last buttons off the `hasPrev`/`hasNext` flags.
    pub fn build(page: i64, page_size: i64, total_items: i64) -> Result<PageMeta, ListQueryError> {
        let pages = total_pages(total_items, page_size);
        if page < 1 || page > pages {
            return Err(ListQueryError(format!(
                "page {} out of range 1..={}",
                page, pages
            )));
        }
        Ok(PageMeta {
            page,
            page_size,
            total_items,
            total_pages: pages,
            has_prev: page > 1,
            has_next: page < pages,
        })
    }
}

/// Blank rows needed to keep a compact sub-list at constant height.
pub fn compact_blank_rows(item_count: usize, page_size: i64) -> usize {
    (page_size as usize).saturating_sub(item_count)
}

/// Collapses a burst of keystrokes into one settled search term. The caller
/// feeds every keystroke through `submit` and polls; nothing fires until the
/// term has been quiet for the debounce window.
#[derive(Debug, Default)]
pub struct SearchDebouncer {
    pending: Option<(String, Instant)>,
}

impl SearchDebouncer {
    pub fn new() -> SearchDebouncer {
        SearchDebouncer { pending: None }
    }

    pub fn submit(&mut self, term: &str, now: Instant) {
        self.pending = Some((term.to_string(), now + SEARCH_DEBOUNCE));
    }

    /// Returns the settled term once its quiet window has passed, at most
    /// once per submitted burst.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => self.pending.take().map(|(t, _)| t),
            _ => None,
        }
    }

    /// Immediately settles whatever is pending (explicit submit, view close).
    pub fn flush(&mut self) -> Option<String> {
        self.pending.take().map(|(t, _)| t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(23, 10), 3);
        assert_eq!(total_pages(20, 10), 2);
        assert_eq!(total_pages(0, 10), 1);
    }

    #[test]
    fn page_meta_rejects_out_of_range() {
        assert!(PageMeta::build(0, 10, 23).is_err());
        assert!(PageMeta::build(4, 10, 23).is_err());
        let meta = PageMeta::build(3, 10, 23).unwrap();
        assert!(meta.has_prev);
        assert!(!meta.has_next);
    }

    #[test]
    fn debounce_collapses_rapid_keystrokes() {
        let t0 = Instant::now();
        let mut d = SearchDebouncer::new();
        d.submit("a", t0);
        d.submit("ab", t0 + Duration::from_millis(100));
        d.submit("abc", t0 + Duration::from_millis(200));
        assert_eq!(d.poll(t0 + Duration::from_millis(450)), None);
        assert_eq!(
            d.poll(t0 + Duration::from_millis(510)),
            Some("abc".to_string())
        );
        assert_eq!(d.poll(t0 + Duration::from_millis(900)), None);
    }

    #[test]
    fn list_query_rejects_bad_order_dir() {
        let q = ListQuery::from_params(&json!({ "orderBy": "name", "orderDir": "sideways" }));
        assert!(q.is_err());
    }
}
