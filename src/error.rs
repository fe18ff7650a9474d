//! Application error taxonomy and its HTTP mapping.
//!
//! [`AppError`] is returned by the service and repository layers. Handlers
//! wrap it in [`ApiError`], which knows the [`DeploymentMode`] and therefore
//! whether the `stack` field of the JSON body may carry internals.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use validator::ValidationErrors;

use crate::config::DeploymentMode;

/// Placeholder returned in place of `stack` when running in production.
pub const STACK_PLACEHOLDER: &str = "🥞";

/// Errors produced while creating or resolving URL mappings.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed URL, slug, or request body.
    #[error("{0}")]
    Validation(String),

    /// The submitted URL points back at this service.
    #[error("Can't shorten {domain}")]
    SelfReference { domain: String },

    /// The requested slug is already mapped.
    #[error("Slug in use: {slug}")]
    SlugConflict { slug: String },

    /// Every generated slug collided with an existing one.
    #[error("Could not find a free slug after {attempts} attempts")]
    SlugExhausted { attempts: usize },

    /// No mapping exists for the slug.
    #[error("Not found")]
    NotFound,

    /// The backing store failed (connectivity, timeouts, unexpected errors).
    #[error("Store error: {0}")]
    Store(String),

    /// A local failure unrelated to input or store, such as the random source.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status this error maps to on the JSON API.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::SelfReference { .. }
            | AppError::SlugConflict { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::SlugExhausted { .. } | AppError::Store(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Store(e.to_string())
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("{field} is invalid"),
                })
            })
            .collect();
        messages.sort();

        AppError::Validation(messages.join("; "))
    }
}

/// JSON error body: `{ "message": ..., "stack": ... }`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub stack: String,
}

/// An [`AppError`] bound to the deployment mode it is rendered in.
#[derive(Debug)]
pub struct ApiError {
    pub error: AppError,
    pub mode: DeploymentMode,
}

impl ApiError {
    pub fn new(error: AppError, mode: DeploymentMode) -> Self {
        Self { error, mode }
    }

    fn body(&self) -> ErrorBody {
        let stack = match self.mode {
            DeploymentMode::Production => STACK_PLACEHOLDER.to_string(),
            DeploymentMode::Development => format!("{:?}", self.error),
        };

        ErrorBody {
            message: self.error.to_string(),
            stack,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.error.status_code();

        if status.is_server_error() {
            tracing::error!(error = ?self.error, "Request failed");
        } else {
            tracing::debug!(error = %self.error, "Request rejected");
        }

        (status, Json(self.body())).into_response()
    }
}
