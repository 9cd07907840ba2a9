use std::sync::Arc;

use crate::config::Config;
use crate::generation::generator::TextGenerator;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable text generator. Default: `LlmClient` (Anthropic Messages API).
    pub generator: Arc<dyn TextGenerator>,
    /// In-memory by default; Redis when `REDIS_URL` is set.
    pub sessions: Arc<dyn SessionStore>,
}
