#![allow(dead_code)]

use axum::Router;
use axum_test::TestServer;
use cdv_shortener::config::{Config, DeploymentMode, RedirectKind};
use cdv_shortener::infrastructure::persistence::InMemoryUrlRepository;
use cdv_shortener::routes::app_router;
use cdv_shortener::state::AppState;
use std::path::PathBuf;
use std::sync::Arc;

pub const SELF_DOMAIN: &str = "cdv.sh";

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost/test".to_string(),
        host: "127.0.0.1".to_string(),
        port: 4100,
        mode: DeploymentMode::Development,
        self_domain: SELF_DOMAIN.to_string(),
        public_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("public"),
        redirect: RedirectKind::Found,
        log_level: "info".to_string(),
        log_format: "text".to_string(),
        db_max_connections: 1,
        db_connect_timeout: 1,
    }
}

pub fn create_test_state(config: &Config) -> (AppState, Arc<InMemoryUrlRepository>) {
    let repo = Arc::new(InMemoryUrlRepository::new());
    let state = AppState::new(repo.clone(), config);

    (state, repo)
}

/// Serves the full application router, middleware included.
pub fn test_server(state: AppState) -> TestServer {
    let app = Router::new().fallback_service(app_router(state));

    TestServer::new(app).unwrap()
}

/// Test server over a fresh in-memory store with default configuration.
pub fn default_server() -> (TestServer, Arc<InMemoryUrlRepository>) {
    let (state, repo) = create_test_state(&test_config());

    (test_server(state), repo)
}
