use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/counts", get(handlers::get_counts))
        .route("/api/counts/:id", get(handlers::get_counter))
        .route("/api/click", post(handlers::click))
        .route("/api/click/:id", post(handlers::click_path))
        .route("/api/reset", post(handlers::reset))
        .with_state(state)
}
