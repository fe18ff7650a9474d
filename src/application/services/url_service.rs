//! Slug creation and resolution service.

use std::sync::Arc;

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::slug_generator::generate_slug;
use crate::utils::validation::validate_submission;

/// Number of generated slugs tried before giving up with [`AppError::SlugExhausted`].
pub const MAX_SLUG_ATTEMPTS: usize = 5;

/// Service for creating and resolving short links.
///
/// Holds the store as an injected [`UrlRepository`], so the server runs it
/// over PostgreSQL while tests substitute a mock or the in-memory fake.
pub struct UrlService<R: UrlRepository + ?Sized = dyn UrlRepository> {
    repository: Arc<R>,
    self_domain: String,
}

impl<R: UrlRepository + ?Sized> UrlService<R> {
    /// Creates a new service.
    ///
    /// `self_domain` is the service's own domain; URLs containing it are refused.
    pub fn new(repository: Arc<R>, self_domain: impl Into<String>) -> Self {
        Self {
            repository,
            self_domain: self_domain.into(),
        }
    }

    /// The own-domain string used by the self-reference guard.
    pub fn self_domain(&self) -> &str {
        &self.self_domain
    }

    /// Creates a short link.
    ///
    /// # Flow
    ///
    /// 1. Validate and trim `url` and `slug`
    /// 2. Without a slug, generate one (retrying on collision)
    /// 3. With a slug, lowercase it and refuse it if already stored
    /// 4. Insert and return the stored mapping
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] for a malformed URL or slug
    /// - [`AppError::SelfReference`] if the URL targets this service
    /// - [`AppError::SlugConflict`] if the requested slug is taken,
    ///   including when a concurrent request inserted it first
    /// - [`AppError::SlugExhausted`] if every generated slug collided
    /// - [`AppError::Store`] on store failures
    pub async fn create(
        &self,
        url: Option<String>,
        slug: Option<String>,
    ) -> Result<UrlMapping, AppError> {
        let submission = validate_submission(url, slug, &self.self_domain)?;

        let mapping = match submission.slug {
            Some(slug) => {
                self.create_with_slug(submission.url, slug.to_ascii_lowercase())
                    .await?
            }
            None => self.create_with_generated_slug(submission.url).await?,
        };

        tracing::info!(slug = %mapping.slug, "Created short link");
        Ok(mapping)
    }

    /// Looks up the mapping for a slug exactly as given.
    ///
    /// Slugs are stored lowercase, but the lookup does not fold case: a
    /// request for `Promo` does not find `promo`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if nothing is stored under `slug`.
    /// Returns [`AppError::Store`] on store failures.
    pub async fn resolve(&self, slug: &str) -> Result<UrlMapping, AppError> {
        self.repository
            .find_by_slug(slug)
            .await?
            .ok_or(AppError::NotFound)
    }

    /// Counts stored mappings.
    pub async fn count(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }

    async fn create_with_slug(&self, url: String, slug: String) -> Result<UrlMapping, AppError> {
        if self.repository.find_by_slug(&slug).await?.is_some() {
            return Err(AppError::SlugConflict { slug });
        }

        // A concurrent insert of the same slug still surfaces as SlugConflict
        // from the store's unique constraint.
        self.repository.insert(NewUrlMapping::new(slug, url)).await
    }

    async fn create_with_generated_slug(&self, url: String) -> Result<UrlMapping, AppError> {
        for attempt in 1..=MAX_SLUG_ATTEMPTS {
            let slug = generate_slug()
                .map_err(|e| AppError::Internal(format!("random source failed: {e}")))?
                .to_ascii_lowercase();

            match self
                .repository
                .insert(NewUrlMapping::new(slug, url.clone()))
                .await
            {
                Err(AppError::SlugConflict { slug }) => {
                    tracing::warn!(%slug, attempt, "Generated slug collided, retrying");
                }
                result => return result,
            }
        }

        Err(AppError::SlugExhausted {
            attempts: MAX_SLUG_ATTEMPTS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUrlRepository;
    use crate::utils::slug_generator::SLUG_LENGTH;
    use chrono::Utc;

    fn stored(new_mapping: NewUrlMapping) -> UrlMapping {
        new_mapping.into_mapping(1, Utc::now())
    }

    fn service(repo: MockUrlRepository) -> UrlService<MockUrlRepository> {
        UrlService::new(Arc::new(repo), "cdv.sh")
    }

    #[tokio::test]
    async fn test_create_with_generated_slug() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo.expect_find_by_slug().times(0);
        mock_repo
            .expect_insert()
            .withf(|new_mapping| {
                new_mapping.slug.len() == SLUG_LENGTH
                    && new_mapping.url == "https://example.com/a/b"
            })
            .times(1)
            .returning(|new_mapping| Ok(stored(new_mapping)));

        let result = service(mock_repo)
            .create(Some("https://example.com/a/b".to_string()), None)
            .await;

        let mapping = result.unwrap();
        assert_eq!(mapping.slug.len(), SLUG_LENGTH);
        assert_eq!(mapping.url, "https://example.com/a/b");
    }

    #[tokio::test]
    async fn test_generated_slug_is_lowercase() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo
            .expect_insert()
            .withf(|new_mapping| !new_mapping.slug.chars().any(|c| c.is_ascii_uppercase()))
            .times(1)
            .returning(|new_mapping| Ok(stored(new_mapping)));

        let result = service(mock_repo)
            .create(Some("https://example.com".to_string()), None)
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_with_custom_slug_lowercases() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo
            .expect_find_by_slug()
            .withf(|slug| slug == "promo")
            .times(1)
            .returning(|_| Ok(None));

        mock_repo
            .expect_insert()
            .withf(|new_mapping| new_mapping.slug == "promo")
            .times(1)
            .returning(|new_mapping| Ok(stored(new_mapping)));

        let result = service(mock_repo)
            .create(
                Some("https://example.com".to_string()),
                Some("  PrOmO ".to_string()),
            )
            .await;

        assert_eq!(result.unwrap().slug, "promo");
    }

    #[tokio::test]
    async fn test_create_custom_slug_conflict() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo
            .expect_find_by_slug()
            .withf(|slug| slug == "promo")
            .times(1)
            .returning(|_| {
                Ok(Some(stored(NewUrlMapping::new(
                    "promo",
                    "https://example.com",
                ))))
            });

        mock_repo.expect_insert().times(0);

        let result = service(mock_repo)
            .create(
                Some("https://other.com".to_string()),
                Some("Promo".to_string()),
            )
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::SlugConflict { slug } if slug == "promo"
        ));
    }

    #[tokio::test]
    async fn test_create_custom_slug_lost_race() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo
            .expect_find_by_slug()
            .times(1)
            .returning(|_| Ok(None));

        mock_repo
            .expect_insert()
            .times(1)
            .returning(|new_mapping| {
                Err(AppError::SlugConflict {
                    slug: new_mapping.slug,
                })
            });

        let result = service(mock_repo)
            .create(
                Some("https://example.com".to_string()),
                Some("race".to_string()),
            )
            .await;

        assert!(matches!(result.unwrap_err(), AppError::SlugConflict { .. }));
    }

    #[tokio::test]
    async fn test_generated_slug_collision_retries() {
        let mut mock_repo = MockUrlRepository::new();
        let mut seq = mockall::Sequence::new();

        mock_repo
            .expect_insert()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|new_mapping| {
                Err(AppError::SlugConflict {
                    slug: new_mapping.slug,
                })
            });

        mock_repo
            .expect_insert()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|new_mapping| Ok(stored(new_mapping)));

        let result = service(mock_repo)
            .create(Some("https://example.com".to_string()), None)
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_generated_slug_exhausted() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo
            .expect_insert()
            .times(MAX_SLUG_ATTEMPTS)
            .returning(|new_mapping| {
                Err(AppError::SlugConflict {
                    slug: new_mapping.slug,
                })
            });

        let result = service(mock_repo)
            .create(Some("https://example.com".to_string()), None)
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::SlugExhausted { attempts: MAX_SLUG_ATTEMPTS }
        ));
    }

    #[tokio::test]
    async fn test_store_error_is_not_retried() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo
            .expect_insert()
            .times(1)
            .returning(|_| Err(AppError::Store("connection refused".to_string())));

        let result = service(mock_repo)
            .create(Some("https://example.com".to_string()), None)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Store(_)));
    }

    #[tokio::test]
    async fn test_invalid_url_never_touches_store() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo.expect_find_by_slug().times(0);
        mock_repo.expect_insert().times(0);

        let result = service(mock_repo)
            .create(Some("not-a-url".to_string()), Some("slug".to_string()))
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_self_reference_never_touches_store() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo.expect_find_by_slug().times(0);
        mock_repo.expect_insert().times(0);

        let result = service(mock_repo)
            .create(Some("https://cdv.sh/x".to_string()), None)
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::SelfReference { .. }
        ));
    }

    #[tokio::test]
    async fn test_resolve_found() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo
            .expect_find_by_slug()
            .withf(|slug| slug == "abcde")
            .times(1)
            .returning(|slug| {
                Ok(Some(stored(NewUrlMapping::new(
                    slug,
                    "https://example.com",
                ))))
            });

        let mapping = service(mock_repo).resolve("abcde").await.unwrap();
        assert_eq!(mapping.url, "https://example.com");
    }

    #[tokio::test]
    async fn test_resolve_does_not_fold_case() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo
            .expect_find_by_slug()
            .withf(|slug| slug == "Promo")
            .times(1)
            .returning(|_| Ok(None));

        let result = service(mock_repo).resolve("Promo").await;
        assert!(matches!(result.unwrap_err(), AppError::NotFound));
    }

    #[tokio::test]
    async fn test_resolve_store_error() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo
            .expect_find_by_slug()
            .times(1)
            .returning(|_| Err(AppError::Store("timeout".to_string())));

        let result = service(mock_repo).resolve("abcde").await;
        assert!(matches!(result.unwrap_err(), AppError::Store(_)));
    }
}
