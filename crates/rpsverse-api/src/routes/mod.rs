//! Route modules.

use axum::Router;

use crate::state::AppState;

pub mod health;
pub mod sessions;

/// The full application router: health check plus the versioned session API.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .nest("/api/v1/sessions", sessions::router())
        .with_state(state)
}
