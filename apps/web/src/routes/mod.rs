pub mod health;

use axum::{routing::get, Router};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/", get(handlers::handle_form))
        .route(
            "/generate/",
            get(handlers::handle_form).post(handlers::handle_generate),
        )
        .route("/download/", get(handlers::handle_download))
        .with_state(state)
}
