//! Handler for the link creation endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection};

use crate::api::dto::create_url::{CreateUrlRequest, CreateUrlResponse};
use crate::error::{ApiError, AppError};
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /url`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/a/b", "slug": "promo" }
/// ```
///
/// `slug` is optional; a random 5-character slug is generated without it.
///
/// # Response
///
/// ```json
/// {
///   "id": 1,
///   "slug": "promo",
///   "url": "https://example.com/a/b",
///   "created_at": "2024-01-15T10:30:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request with `{message, stack}` for invalid input, a URL
/// pointing at this service, or a slug already in use. Returns 500 for store
/// failures or when no free slug could be generated.
pub async fn create_url_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateUrlRequest>, JsonRejection>,
) -> Result<Json<CreateUrlResponse>, ApiError> {
    let Json(request) =
        payload.map_err(|rejection| state.api_error(AppError::Validation(rejection.body_text())))?;

    let mapping = state
        .url_service
        .create(request.url, request.slug)
        .await
        .map_err(|e| state.api_error(e))?;

    Ok(Json(mapping.into()))
}
