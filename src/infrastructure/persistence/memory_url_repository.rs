//! In-memory implementation of the URL repository.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// Process-local URL store.
///
/// Inserts take the write lock, so of two racing inserts of one slug exactly
/// one succeeds, like the unique constraint of the PostgreSQL table.
/// [`InMemoryUrlRepository::set_available`] simulates an unreachable store.
#[derive(Default)]
pub struct InMemoryUrlRepository {
    mappings: RwLock<HashMap<String, UrlMapping>>,
    unavailable: AtomicBool,
}

impl InMemoryUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// When `false`, every operation fails with [`AppError::Store`].
    pub fn set_available(&self, available: bool) {
        self.unavailable.store(!available, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), AppError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::Store("store unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn insert(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError> {
        self.check_available()?;

        let mut mappings = self.mappings.write().await;
        if mappings.contains_key(&new_mapping.slug) {
            return Err(AppError::SlugConflict {
                slug: new_mapping.slug,
            });
        }

        let id = mappings.len() as i64 + 1;
        let mapping = new_mapping.into_mapping(id, Utc::now());
        mappings.insert(mapping.slug.clone(), mapping.clone());

        Ok(mapping)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<UrlMapping>, AppError> {
        self.check_available()?;

        Ok(self.mappings.read().await.get(slug).cloned())
    }

    async fn count(&self) -> Result<i64, AppError> {
        self.check_available()?;

        Ok(self.mappings.read().await.len() as i64)
    }
}
