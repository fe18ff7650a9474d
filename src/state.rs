//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::UrlService;
use crate::config::{Config, DeploymentMode, RedirectKind};
use crate::domain::repositories::UrlRepository;
use crate::error::{ApiError, AppError};
use crate::infrastructure::assets::PublicAssets;

/// Application state shared across all request handlers.
///
/// Cheap to clone: everything mutable lives behind the repository, and the
/// rest is immutable configuration.
#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<UrlService>,
    pub assets: Arc<PublicAssets>,
    pub mode: DeploymentMode,
    pub redirect: RedirectKind,
}

impl AppState {
    /// Builds the state from a repository and the loaded configuration.
    pub fn new(repository: Arc<dyn UrlRepository>, config: &Config) -> Self {
        Self {
            url_service: Arc::new(UrlService::new(repository, config.self_domain.clone())),
            assets: Arc::new(PublicAssets::load(&config.public_dir)),
            mode: config.mode,
            redirect: config.redirect,
        }
    }

    /// Wraps an error for rendering under this state's deployment mode.
    pub fn api_error(&self, error: AppError) -> ApiError {
        ApiError::new(error, self.mode)
    }
}
