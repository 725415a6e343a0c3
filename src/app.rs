use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/dashboard", get(handlers::dashboard))
        .route("/api/collection", get(handlers::get_collection))
        .route("/api/intake", post(handlers::intake))
        .route("/api/views/:view", get(handlers::get_view))
        .route("/api/views/:view/refresh", post(handlers::refresh_view))
        .with_state(state)
}
