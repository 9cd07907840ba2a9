//! Session storage backends.
//!
//! `MemorySessionStore` is the default; `RedisSessionStore` is used when
//! `REDIS_URL` is configured so sessions survive restarts and are shared
//! between instances.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tokio::sync::{OnceCell, RwLock};
use tracing::debug;
use uuid::Uuid;

use crate::models::SessionData;
use crate::session::SessionError;

const REDIS_KEY_PREFIX: &str = "resume_session";

/// Key/value storage for per-browser session data.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the stored data, or `None` if the id is unknown or expired.
    async fn load(&self, id: Uuid) -> Result<Option<SessionData>, SessionError>;

    /// Creates or overwrites the data stored under `id`.
    async fn save(&self, id: Uuid, data: &SessionData) -> Result<(), SessionError>;

    /// How long a session lives after its last save.
    fn ttl(&self) -> Duration;
}

/// Process-local store. Expired entries are dropped on load and swept on every save.
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<Uuid, SessionData>>,
    ttl: Duration,
}

impl MemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, id: Uuid) -> Result<Option<SessionData>, SessionError> {
        let data = self.sessions.read().await.get(&id).cloned();
        match data {
            Some(data) if data.is_expired(Utc::now(), self.ttl) => {
                let mut sessions = self.sessions.write().await;
                Ok(live_or_evict(&mut sessions, id, Utc::now(), self.ttl))
            }
            other => Ok(other),
        }
    }

    async fn save(&self, id: Uuid, data: &SessionData) -> Result<(), SessionError> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, stored| !stored.is_expired(now, self.ttl));
        let swept = before - sessions.len();
        if swept > 0 {
            debug!("Swept {swept} expired sessions");
        }
        sessions.insert(id, data.clone());
        Ok(())
    }

    fn ttl(&self) -> Duration {
        self.ttl
    }
}

/// Returns the entry under `id` if it is still live and removes it otherwise.
///
/// Called with the write lock held, so a save that landed after an earlier read is kept.
fn live_or_evict(
    sessions: &mut HashMap<Uuid, SessionData>,
    id: Uuid,
    now: DateTime<Utc>,
    ttl: Duration,
) -> Option<SessionData> {
    match sessions.get(&id) {
        Some(data) if !data.is_expired(now, ttl) => Some(data.clone()),
        _ => {
            sessions.remove(&id);
            None
        }
    }
}

/// Redis-backed store. Each session is one JSON string with a Redis expiry.
///
/// One multiplexed connection is opened on first use and shared by every request.
pub struct RedisSessionStore {
    client: redis::Client,
    connection: OnceCell<MultiplexedConnection>,
    ttl: Duration,
}

impl RedisSessionStore {
    pub fn new(client: redis::Client, ttl: Duration) -> Self {
        Self {
            client,
            connection: OnceCell::new(),
            ttl,
        }
    }

    /// A handle on the shared connection. A failed connect is retried on the next call.
    async fn connection(&self) -> Result<MultiplexedConnection, SessionError> {
        let conn = self
            .connection
            .get_or_try_init(|| async {
                let conn = self.client.get_multiplexed_async_connection().await?;
                debug!("Opened Redis session connection");
                Ok::<_, SessionError>(conn)
            })
            .await?;
        Ok(conn.clone())
    }

    fn key(id: Uuid) -> String {
        format!("{REDIS_KEY_PREFIX}:{id}")
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn load(&self, id: Uuid) -> Result<Option<SessionData>, SessionError> {
        let mut conn = self.connection().await?;
        let raw: Option<String> = conn.get(Self::key(id)).await?;
        match raw {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, id: Uuid, data: &SessionData) -> Result<(), SessionError> {
        let payload = serde_json::to_string(data)?;
        let mut conn = self.connection().await?;
        conn.set_ex::<_, _, ()>(Self::key(id), payload, self.ttl.as_secs().max(1))
            .await?;
        Ok(())
    }

    fn ttl(&self) -> Duration {
        self.ttl
    }
}
