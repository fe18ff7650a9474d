//! Handler for short link redirects.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};
use tracing::{debug, error, warn};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a slug to its stored URL.
///
/// # Endpoint
///
/// `GET /{slug}`
///
/// The slug is looked up exactly as given; no case folding is applied.
///
/// # Responses
///
/// - **302 Found** (or **301** with `REDIRECT_PERMANENT`) with `Location`
///   set to the stored URL
/// - **404 Not Found** with the static 404 page otherwise
///
/// Store failures are answered with the same 404 page as a missing slug and
/// logged at `error` level so they stay visible to operators.
pub async fn redirect_handler(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    let mapping = match state.url_service.resolve(&slug).await {
        Ok(mapping) => mapping,
        Err(AppError::NotFound) => {
            debug!(%slug, "No mapping for slug");
            return state.assets.not_found_response();
        }
        Err(e) => {
            error!(%slug, error = %e, "Slug lookup failed");
            return state.assets.not_found_response();
        }
    };

    match HeaderValue::from_str(&mapping.url) {
        Ok(location) => (state.redirect.status_code(), [(header::LOCATION, location)]).into_response(),
        Err(_) => {
            warn!(%slug, "Stored URL is not a valid Location header");
            state.assets.not_found_response()
        }
    }
}
