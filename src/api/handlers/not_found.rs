//! Fallback handler for unmatched routes.

use axum::{extract::State, response::Response};

use crate::state::AppState;

/// Serves the static 404 page.
pub async fn not_found_handler(State(state): State<AppState>) -> Response {
    state.assets.not_found_response()
}
