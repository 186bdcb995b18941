use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::http::{header, HeaderMap};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::User;

pub const SESSION_COOKIE: &str = "session_id";

const MAX_TTL: Duration = Duration::from_secs(10 * 365 * 24 * 60 * 60);

/// Who is logged in behind a session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: i64,
    pub username: String,
    pub is_admin: bool,
}

impl From<&User> for Session {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            is_admin: user.is_admin,
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    session: Session,
    expires_at: Instant,
}

/// In-memory session table, token -> session. Lost on restart.
///
/// Sessions live for `ttl` after login. Expired entries are refused by `get`
/// and swept out whenever a new session is created.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Entry>>>,
    ttl: Duration,
}

impl SessionStore {
    /// `ttl` is capped at ten years.
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::default(),
            ttl: ttl.min(MAX_TTL),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn create(&self, session: Session) -> String {
        let token = Uuid::new_v4().to_string();
        let now = Instant::now();

        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, entry| entry.expires_at > now);
        sessions.insert(
            token.clone(),
            Entry {
                session,
                expires_at: now + self.ttl,
            },
        );
        token
    }

    pub async fn get(&self, token: &str) -> Option<Session> {
        let now = Instant::now();
        {
            let sessions = self.sessions.read().await;
            match sessions.get(token) {
                Some(entry) if entry.expires_at > now => return Some(entry.session.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        self.sessions.write().await.remove(token);
        None
    }

    pub async fn remove(&self, token: &str) -> Option<Session> {
        self.sessions
            .write()
            .await
            .remove(token)
            .map(|entry| entry.session)
    }
}

pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|cookie| cookie.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

pub fn session_cookie(token: &str, ttl: Duration) -> String {
    format!(
        "{SESSION_COOKIE}={token}; HttpOnly; Path=/; SameSite=Lax; Max-Age={}",
        ttl.as_secs()
    )
}

pub fn expired_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0")
}
