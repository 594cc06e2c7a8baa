//! Test utilities for API server integration tests

use axum_test::TestServer;
use std::sync::Arc;
use std::time::Instant;
use themetrix::core::http::{create_router, AppState, HealthStatus};
use themetrix::metrics::Metrics;
use tokio::sync::RwLock;

/// Test helper for API server integration tests
#[allow(dead_code)]
pub struct TestApiServer {
    pub server: TestServer,
    pub metrics: Arc<Metrics>,
}

impl TestApiServer {
    /// Start a server with no database attached.
    pub async fn new() -> Self {
        let metrics = Arc::new(Metrics::new().expect("metrics initialization"));
        let state = AppState {
            health: Arc::new(RwLock::new(HealthStatus::default())),
            metrics: metrics.clone(),
            start_time: Arc::new(Instant::now()),
            database: None,
            framework_cache: Arc::new(RwLock::new(None)),
            momentum_cache: Arc::new(RwLock::new(None)),
        };

        let app = create_router(state);
        let server = TestServer::new(app).expect("start test server");

        Self { server, metrics }
    }
}
