use cdv_shortener::application::services::UrlService;
use cdv_shortener::domain::repositories::UrlRepository;
use cdv_shortener::error::AppError;
use cdv_shortener::infrastructure::persistence::InMemoryUrlRepository;
use std::collections::HashSet;
use std::sync::Arc;

fn service() -> (Arc<UrlService>, Arc<InMemoryUrlRepository>) {
    let repo = Arc::new(InMemoryUrlRepository::new());
    let store: Arc<dyn UrlRepository> = repo.clone();
    let service = Arc::new(UrlService::new(store, "cdv.sh"));

    (service, repo)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_custom_slug_has_single_winner() {
    let (service, repo) = service();

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .create(
                        Some(format!("https://example.com/{i}")),
                        Some("race".to_string()),
                    )
                    .await
            })
        })
        .collect();

    let mut successes = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(mapping) => {
                assert_eq!(mapping.slug, "race");
                successes += 1;
            }
            Err(AppError::SlugConflict { slug }) => {
                assert_eq!(slug, "race");
                conflicts += 1;
            }
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(conflicts, 15);
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_generated_slugs_are_distinct() {
    let (service, repo) = service();

    let handles: Vec<_> = (0..50)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .create(Some(format!("https://example.com/{i}")), None)
                    .await
            })
        })
        .collect();

    let mut slugs = HashSet::new();
    for handle in handles {
        let mapping = handle.await.unwrap().unwrap();
        assert!(slugs.insert(mapping.slug));
    }

    assert_eq!(repo.count().await.unwrap(), 50);
}

#[tokio::test]
async fn test_resolve_returns_created_mapping() {
    let (service, _repo) = service();

    let created = service
        .create(Some("https://example.com/x".to_string()), Some("Mixed".to_string()))
        .await
        .unwrap();
    assert_eq!(created.slug, "mixed");

    let resolved = service.resolve("mixed").await.unwrap();
    assert_eq!(resolved.url, "https://example.com/x");
    assert_eq!(resolved.id, created.id);

    assert!(matches!(
        service.resolve("Mixed").await,
        Err(AppError::NotFound)
    ));
}
