//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /url`     - Create a short link (JSON)
//! - `GET  /{file}`  - Static file from the public directory, if one exists
//! - `GET  /{slug}`  - Short link redirect otherwise
//! - anything else   - Static 404 page
//!
//! Static files take precedence over slugs: a request is first tried against
//! the public directory and only reaches the redirect resolver when no file
//! matches.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Permissive cross-origin access
//! - **Security headers** - `nosniff`, frame and referrer policies
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::{create_url_handler, not_found_handler, redirect_handler};
use crate::api::middleware::{headers, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let resolver = Router::new()
        .route(
            "/{slug}",
            get(redirect_handler).fallback(not_found_handler),
        )
        .fallback(not_found_handler)
        .with_state(state.clone());

    let public = ServeDir::new(state.assets.dir())
        .call_fallback_on_method_not_allowed(true)
        .fallback(resolver);

    let router = Router::new()
        .route(
            "/url",
            post(create_url_handler).fallback_service(public.clone()),
        )
        .fallback_service(public)
        .with_state(state);

    let router = headers::with_security_headers(router)
        .layer(headers::cors_layer())
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
