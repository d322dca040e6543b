use std::collections::HashMap;

use async_trait::async_trait;
use axum::http::{HeaderMap, header};
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

/// The one session capability the page flows need from their host: revoking
/// a session by id. Issuing and validating sessions stays with whatever
/// fronts this application.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Drop the session if it is live. Returns whether anything was dropped.
    async fn invalidate(&self, session_id: Uuid) -> bool;
}

/// A live session tracked by [`InMemorySessionStore`].
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub username: String,
    pub opened_at: DateTime<Utc>,
}

/// Process-local session store.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<Uuid, SessionRecord>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session for `username` and return its id.
    pub async fn open(&self, username: impl Into<String>) -> Uuid {
        let session_id = Uuid::new_v4();
        let record = SessionRecord {
            username: username.into(),
            opened_at: Utc::now(),
        };
        self.sessions.lock().await.insert(session_id, record);
        session_id
    }

    pub async fn contains(&self, session_id: Uuid) -> bool {
        self.sessions.lock().await.contains_key(&session_id)
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn invalidate(&self, session_id: Uuid) -> bool {
        let removed = self.sessions.lock().await.remove(&session_id).is_some();
        if removed {
            info!("Invalidated session: {}", session_id);
        }
        removed
    }
}

/// Pull a session id out of the request's `Cookie` header. Malformed ids and
/// absent cookies both come back as `None`.
pub fn session_id_from_headers(headers: &HeaderMap, cookie_name: &str) -> Option<Uuid> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

/// `Set-Cookie` value that clears the session cookie on the client.
pub fn expired_session_cookie(cookie_name: &str) -> String {
    format!("{}=; Path=/; Max-Age=0; HttpOnly", cookie_name)
}
