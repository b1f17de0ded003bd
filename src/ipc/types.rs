use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::gateway::Gateway;
use crate::listview::SearchDebouncer;
use crate::session::SessionDb;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub gateway: Gateway,
    pub state_dir: Option<PathBuf>,
    pub session: Option<SessionDb>,
    pub debouncers: HashMap<String, SearchDebouncer>,
}

impl AppState {
    pub fn new(gateway: Gateway) -> AppState {
        AppState {
            gateway,
            state_dir: None,
            session: None,
            debouncers: HashMap::new(),
        }
    }
}
