//! Server-side sessions
//!
//! Provides in-memory session storage mapping session tokens to session
//! records, and the per-request [`Session`] handle the controller uses to
//! read and write the authenticated-user marker.

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::user::User;

/// Session token (UUID stored in cookie)
pub type SessionToken = String;

/// Attribute key under which the authenticated user is kept.
pub const USER_SESSION_KEY: &str = "sessionedUser";

/// Idle time after which a session expires, unless configured otherwise.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("No user in session")]
    MissingUser,
}

/// One client's session record.
#[derive(Clone, Debug)]
pub struct SessionRecord {
    attributes: HashMap<String, User>,
    last_seen: Instant,
}

impl SessionRecord {
    fn new() -> Self {
        Self {
            attributes: HashMap::new(),
            last_seen: Instant::now(),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.last_seen.elapsed() >= ttl
    }
}

/// In-memory session store
///
/// Maps session tokens (UUIDs) to session records.
/// Sessions are ephemeral and lost on server restart.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<SessionToken, SessionRecord>>>,
    ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// Create a new empty session store with [`DEFAULT_SESSION_TTL`]
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_SESSION_TTL)
    }

    /// Create a new empty session store whose records expire after `ttl` idle.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Idle time after which a session expires.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Open the session for `token`, or start a new one.
    ///
    /// An unknown or expired token is treated like no token at all: a fresh
    /// session with a newly generated token is created. Opening a live
    /// session marks it as seen.
    pub async fn open(&self, token: Option<&str>) -> Session {
        let mut sessions = self.sessions.write().await;

        if let Some(token) = token {
            let expired = match sessions.get_mut(token) {
                Some(record) if !record.is_expired(self.ttl) => {
                    record.last_seen = Instant::now();
                    return Session {
                        store: self.clone(),
                        token: token.to_string(),
                    };
                }
                Some(_) => true,
                None => false,
            };
            if expired {
                sessions.remove(token);
                tracing::debug!("Session expired");
            }
        }

        let token = Uuid::new_v4().to_string();
        sessions.insert(token.clone(), SessionRecord::new());
        Session {
            store: self.clone(),
            token,
        }
    }

    /// Destroy a session entirely.
    pub async fn destroy(&self, token: &str) {
        self.sessions.write().await.remove(token);
    }

    /// Drop every record idle for longer than the TTL, returning how many.
    pub async fn purge_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, record| !record.is_expired(self.ttl));
        before - sessions.len()
    }

    /// Get the number of live sessions (for debugging)
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Handle on one client's session, passed explicitly into each request.
#[derive(Clone)]
pub struct Session {
    store: SessionStore,
    token: SessionToken,
}

impl Session {
    /// Token identifying this session, for the session cookie.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// True iff an authenticated user is recorded in this session.
    pub async fn is_login_user(&self) -> bool {
        let sessions = self.store.sessions.read().await;
        sessions
            .get(&self.token)
            .is_some_and(|record| record.attributes.contains_key(USER_SESSION_KEY))
    }

    /// The authenticated user.
    ///
    /// Fails with [`SessionError::MissingUser`] when nobody is logged in;
    /// check [`Session::is_login_user`] first.
    pub async fn user(&self) -> Result<User, SessionError> {
        let sessions = self.store.sessions.read().await;
        sessions
            .get(&self.token)
            .and_then(|record| record.attributes.get(USER_SESSION_KEY))
            .cloned()
            .ok_or(SessionError::MissingUser)
    }

    /// Record `user` as the authenticated user of this session.
    pub async fn set_user(&self, user: User) {
        let mut sessions = self.store.sessions.write().await;
        let record = sessions
            .entry(self.token.clone())
            .or_insert_with(SessionRecord::new);
        record.last_seen = Instant::now();
        record
            .attributes
            .insert(USER_SESSION_KEY.to_string(), user);
    }

    /// Remove the authenticated user. Safe to call when nobody is logged in.
    pub async fn clear_user(&self) {
        let mut sessions = self.store.sessions.write().await;
        if let Some(record) = sessions.get_mut(&self.token) {
            record.attributes.remove(USER_SESSION_KEY);
        }
    }
}
