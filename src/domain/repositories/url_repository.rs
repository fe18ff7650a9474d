//! Repository trait for slug → URL mappings.

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage for URL mappings, keyed by slug.
///
/// The store owns the uniqueness of slugs: two concurrent inserts of the same
/// slug must result in exactly one success, the other reporting
/// [`AppError::SlugConflict`]. Callers never take locks of their own.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryUrlRepository`] - In-process fake
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts a new mapping.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::SlugConflict`] if the slug is already stored.
    /// Returns [`AppError::Store`] on backing-store failures.
    async fn insert(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError>;

    /// Finds a mapping by exact slug. No case folding is applied.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on backing-store failures.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<UrlMapping>, AppError>;

    /// Counts stored mappings.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on backing-store failures.
    async fn count(&self) -> Result<i64, AppError>;
}
