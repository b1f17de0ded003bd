use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use rusqlite::{Connection, OptionalExtension};
use sha2::{Digest, Sha256};

pub const SESSION_TTL_DAYS: i64 = 7;

/// Role ids as the backend assigns them. Presentation hint only; the
/// backend stays the authority on what a session may actually do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Tutor,
    Student,
}

impl Role {
    pub fn from_id(id: i64) -> Option<Role> {
        match id {
            1 => Some(Role::Admin),
            2 => Some(Role::Tutor),
            3 => Some(Role::Student),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Tutor => "tutor",
            Role::Student => "student",
        }
    }

    /// Landing route for an already-authenticated session hitting /login.
    pub fn home_path(self) -> &'static str {
        match self {
            Role::Admin => "/admin",
            Role::Tutor => "/tutor",
            Role::Student => "/student",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub token: String,
    pub role: Option<Role>,
    pub expires_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Local session store, the daemon's counterpart of the 7-day auth cookie.
/// Only the token, a cached role id and the expiry live here; the token is
/// logged exclusively as a sha-256 fingerprint.
pub struct SessionDb {
    conn: Connection,
}

impl SessionDb {
    pub fn open(state_dir: &Path) -> anyhow::Result<SessionDb> {
        std::fs::create_dir_all(state_dir)?;
        let conn = Connection::open(state_dir.join("session.sqlite3"))?;
        init_schema(&conn)?;
        Ok(SessionDb { conn })
    }

    /// In-memory store; session state that does not survive the process.
    pub fn open_in_memory() -> anyhow::Result<SessionDb> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(SessionDb { conn })
    }

    pub fn save(&self, token: &str, role: Option<Role>, now: DateTime<Utc>) -> anyhow::Result<()> {
        let expires_at = now + Duration::days(SESSION_TTL_DAYS);
        let fingerprint = token_fingerprint(token);
        self.conn.execute(
            "INSERT INTO session(id, token, role_id, token_fingerprint, expires_at)
             VALUES(1, ?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
               token = excluded.token,
               role_id = excluded.role_id,
               token_fingerprint = excluded.token_fingerprint,
               expires_at = excluded.expires_at",
            (
                token,
                role.map(role_id),
                &fingerprint,
                expires_at.to_rfc3339(),
            ),
        )?;
        log::info!("session stored (token {})", fingerprint);
        Ok(())
    }

    pub fn clear(&self) -> anyhow::Result<()> {
        self.conn.execute("DELETE FROM session", [])?;
        Ok(())
    }

    pub fn current(&self) -> anyhow::Result<Option<SessionRecord>> {
        let row: Option<(String, Option<i64>, String)> = self
            .conn
            .query_row(
                "SELECT token, role_id, expires_at FROM session WHERE id = 1",
                [],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
            )
            .optional()?;
        let Some((token, role_id, expires_at)) = row else {
            return Ok(None);
        };
        let expires_at = DateTime::parse_from_rfc3339(&expires_at)
            .map_err(|e| anyhow::anyhow!("stored expiry unreadable: {}", e))?
            .with_timezone(&Utc);
        Ok(Some(SessionRecord {
            token,
            role: role_id.and_then(Role::from_id),
            expires_at,
        }))
    }

    /// Token usable for outgoing requests, dropping expired sessions.
    pub fn active(&self, now: DateTime<Utc>) -> anyhow::Result<Option<SessionRecord>> {
        match self.current()? {
            Some(rec) if !rec.expired(now) => Ok(Some(rec)),
            _ => Ok(None),
        }
    }
}

fn init_schema(conn: &Connection) -> anyhow::Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS session(
            id INTEGER PRIMARY KEY CHECK (id = 1),
            token TEXT NOT NULL,
            role_id INTEGER,
            token_fingerprint TEXT NOT NULL,
            expires_at TEXT NOT NULL
        )",
        [],
    )?;
    Ok(())
}

fn role_id(role: Role) -> i64 {
    match role {
        Role::Admin => 1,
        Role::Tutor => 2,
        Role::Student => 3,
    }
}

pub fn token_fingerprint(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    let hex: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
    hex[..16].to_string()
}

/// Path prefixes the shell may only open with a live session.
const PROTECTED_PREFIXES: &[&str] = &[
    "/admin",
    "/tutor",
    "/student",
    "/meetings",
    "/documents",
];

pub const LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectToLogin,
    RedirectTo(String),
}

/// Route guard: protected prefixes require a live session; a live session
/// on the login route is bounced to its role home.
pub fn check_route(path: &str, session: Option<&SessionRecord>, now: DateTime<Utc>) -> GuardDecision {
    let live = session.map(|s| !s.expired(now)).unwrap_or(false);
    if path == LOGIN_PATH || path.starts_with("/login/") {
        if live {
            let home = session
                .and_then(|s| s.role)
                .map(|r| r.home_path())
                .unwrap_or("/admin");
            return GuardDecision::RedirectTo(home.to_string());
        }
        return GuardDecision::Allow;
    }
    let protected = PROTECTED_PREFIXES.iter().any(|p| {
        path == *p || path.starts_with(&format!("{}/", p))
    });
    if protected && !live {
        return GuardDecision::RedirectToLogin;
    }
    GuardDecision::Allow
}
