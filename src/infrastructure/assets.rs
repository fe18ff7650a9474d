//! The public static asset directory.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::path::{Path, PathBuf};

/// File served for redirect misses and unmatched routes.
pub const NOT_FOUND_FILE: &str = "404.html";

/// Served when the public directory has no `404.html`.
const FALLBACK_NOT_FOUND_PAGE: &str = "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>Not found</title></head>\n<body><h1>404</h1><p>Not found.</p></body>\n</html>\n";

/// Static assets served alongside the API.
///
/// The 404 page is read once at startup; other files are served from `dir`
/// on demand.
#[derive(Debug, Clone)]
pub struct PublicAssets {
    dir: PathBuf,
    not_found_page: String,
}

impl PublicAssets {
    /// Loads the asset directory, falling back to a built-in 404 page when
    /// `dir/404.html` cannot be read.
    pub fn load(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let page_path = dir.join(NOT_FOUND_FILE);

        let not_found_page = match std::fs::read_to_string(&page_path) {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(
                    path = %page_path.display(),
                    error = %e,
                    "Not-found page unavailable, using built-in page"
                );
                FALLBACK_NOT_FOUND_PAGE.to_string()
            }
        };

        Self {
            dir,
            not_found_page,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The 404 page with a `404 Not Found` status.
    pub fn not_found_response(&self) -> Response {
        (StatusCode::NOT_FOUND, Html(self.not_found_page.clone())).into_response()
    }
}
