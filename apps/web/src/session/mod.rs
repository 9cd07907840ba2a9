//! Per-request session context.
//!
//! Handlers never touch the store directly. They extract a `SessionContext`,
//! read or mutate `ctx.data`, call `save`, and pass the response through
//! `finish` so the browser receives (or refreshes) the session cookie.

pub mod store;

use std::time::Duration;

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{
        header::{COOKIE, SET_COOKIE},
        request::Parts,
        HeaderMap, HeaderValue,
    },
    response::Response,
};
use chrono::Utc;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::SessionData;
use crate::state::AppState;

pub use store::{MemorySessionStore, RedisSessionStore, SessionStore};

pub const SESSION_COOKIE: &str = "resume_session";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Session payload error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The session attached to the current request.
#[derive(Debug)]
pub struct SessionContext {
    id: Uuid,
    is_new: bool,
    saved: bool,
    pub data: SessionData,
}

impl SessionContext {
    fn fresh() -> Self {
        Self {
            id: Uuid::new_v4(),
            is_new: true,
            saved: false,
            data: SessionData::default(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Writes `data` to the store, stamping `updated_at`.
    pub async fn save(&mut self, store: &dyn SessionStore) -> Result<(), SessionError> {
        self.data.updated_at = Some(Utc::now());
        store.save(self.id, &self.data).await?;
        if self.is_new && !self.saved {
            debug!("Created session {}", self.id);
        }
        self.saved = true;
        Ok(())
    }

    /// Attaches the session cookie to `response` if this request saved the session.
    pub fn finish(&self, mut response: Response, ttl: Duration) -> Response {
        if self.saved {
            match HeaderValue::from_str(&session_cookie(self.id, ttl)) {
                Ok(value) => {
                    response.headers_mut().append(SET_COOKIE, value);
                }
                Err(e) => warn!("Could not build session cookie: {e}"),
            }
        }
        response
    }
}

#[async_trait]
impl FromRequestParts<AppState> for SessionContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(id) = session_id_from_headers(&parts.headers) {
            if let Some(data) = state.sessions.load(id).await? {
                return Ok(Self {
                    id,
                    is_new: false,
                    saved: false,
                    data,
                });
            }
        }
        Ok(Self::fresh())
    }
}

/// Finds the session id among all `Cookie` headers. Malformed ids are ignored.
fn session_id_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

fn session_cookie(id: Uuid, ttl: Duration) -> String {
    format!(
        "{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        ttl.as_secs()
    )
}
