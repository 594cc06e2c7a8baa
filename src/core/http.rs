//! HTTP endpoint server using Axum

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::{get, put},
    Router,
};
use chrono::{Duration as ChronoDuration, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, Level};

use crate::db::ThemeDatabase;
use crate::metrics::Metrics;
use crate::models::{Confidence, MomentumSnapshot, Score, TimeRange};
use crate::momentum::MomentumCalculator;
use crate::scoring::{FrameworkCache, ScoreAggregator, FRAMEWORK_CACHE_TTL};

/// How long computed momentum snapshots stay fresh before a recompute.
pub const MOMENTUM_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Cached momentum result set with its compute instant.
pub struct MomentumCache {
    computed_at: Instant,
    snapshots: Vec<MomentumSnapshot>,
}

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub database: Option<Arc<ThemeDatabase>>,
    pub framework_cache: Arc<RwLock<Option<FrameworkCache>>>,
    pub momentum_cache: Arc<RwLock<Option<MomentumCache>>>,
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

type ErrorResponse = (StatusCode, Json<Value>);

fn error_response(status: StatusCode, message: impl Into<String>) -> ErrorResponse {
    (status, Json(json!({ "error": message.into() })))
}

fn database_unavailable() -> ErrorResponse {
    error_response(StatusCode::SERVICE_UNAVAILABLE, "Database unavailable")
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "themetrix-momentum-engine"
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();

    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();

    state.metrics.http_requests_in_flight.dec();
    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

#[derive(Debug, Deserialize)]
struct ThemeQuery {
    pillar: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MomentumQuery {
    #[serde(rename = "timeRange")]
    time_range: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpsertScoreRequest {
    score: Option<f64>,
    confidence: Option<Confidence>,
    notes: Option<String>,
    update_source: Option<String>,
}

/// List active themes, optionally filtered by pillar
async fn list_themes(
    State(state): State<AppState>,
    Query(params): Query<ThemeQuery>,
) -> Result<Json<Value>, ErrorResponse> {
    let db = state.database.as_ref().ok_or_else(database_unavailable)?;

    let themes = db.get_themes(params.pillar.as_deref()).await.map_err(|e| {
        error!(error = %e, "Failed to load themes");
        error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    Ok(Json(json!(themes)))
}

/// Get a theme by ID
async fn get_theme(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ErrorResponse> {
    let db = state.database.as_ref().ok_or_else(database_unavailable)?;

    let theme = db.get_theme(id).await.map_err(|e| {
        error!(error = %e, theme_id = id, "Failed to load theme");
        if e.to_string().contains("not found") {
            error_response(StatusCode::NOT_FOUND, e.to_string())
        } else {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    })?;

    Ok(Json(json!(theme)))
}

/// Scoring framework (categories with nested criteria), served through
/// the read-through cache
async fn get_framework(State(state): State<AppState>) -> Result<Json<Value>, ErrorResponse> {
    let categories = load_framework(&state).await?;
    Ok(Json(json!(categories)))
}

/// Raw scores for one theme (detail view)
async fn list_theme_scores(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ErrorResponse> {
    let db = state.database.as_ref().ok_or_else(database_unavailable)?;

    let scores = db.get_theme_scores(id).await.map_err(|e| {
        error!(error = %e, theme_id = id, "Failed to load scores");
        error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    Ok(Json(json!(scores)))
}

/// Aggregated overall score and confidence for one theme
async fn get_theme_score(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ErrorResponse> {
    let db = state.database.as_ref().ok_or_else(database_unavailable)?;

    let categories = load_framework(&state).await?;
    let scores = db.get_theme_scores(id).await.map_err(|e| {
        error!(error = %e, theme_id = id, "Failed to load scores");
        error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    let result = ScoreAggregator::aggregate(&categories, &scores);

    Ok(Json(json!({
        "theme_id": id,
        "overall_score": result.overall_score,
        "overall_confidence": result.overall_confidence,
    })))
}

/// Upsert one score keyed by (theme_id, criteria_id)
async fn upsert_score(
    State(state): State<AppState>,
    Path((theme_id, criteria_id)): Path<(i64, i64)>,
    Json(request): Json<UpsertScoreRequest>,
) -> Result<Json<Value>, ErrorResponse> {
    let db = state.database.as_ref().ok_or_else(database_unavailable)?;

    let score = Score {
        theme_id,
        criteria_id,
        value: request.score,
        confidence: request.confidence,
        notes: request.notes,
        updated_at: Utc::now(),
        update_source: request.update_source,
    };

    let stored = db.upsert_score(&score).await.map_err(|e| {
        error!(error = %e, theme_id, criteria_id, "Failed to upsert score");
        error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    Ok(Json(json!(stored)))
}

/// Momentum snapshots for all active themes, sorted by momentum score.
/// Results are cached for up to an hour; `timeRange` only labels which
/// velocity consumers highlight.
async fn theme_momentum(
    State(state): State<AppState>,
    Query(params): Query<MomentumQuery>,
) -> Result<Json<Value>, ErrorResponse> {
    let db = state.database.as_ref().ok_or_else(database_unavailable)?;
    let time_range = TimeRange::parse(params.time_range.as_deref());

    {
        let cache = state.momentum_cache.read().await;
        if let Some(ref cached) = *cache {
            if cached.computed_at.elapsed() < MOMENTUM_CACHE_TTL {
                return Ok(Json(json!({
                    "data": cached.snapshots,
                    "time_range": time_range.as_str(),
                })));
            }
        }
    }

    let as_of = Utc::now();
    let themes = db.get_themes(None).await.map_err(|e| {
        error!(error = %e, "Failed to load themes for momentum");
        error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;
    let signals = db
        .get_signal_window(as_of - ChronoDuration::days(90))
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to load signal window");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;
    let score_updates = db
        .get_score_updates(as_of - ChronoDuration::days(30))
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to load score updates");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;

    let snapshots = MomentumCalculator::calculate(&themes, &signals, &score_updates, as_of);

    let mut cache = state.momentum_cache.write().await;
    *cache = Some(MomentumCache {
        computed_at: Instant::now(),
        snapshots: snapshots.clone(),
    });

    Ok(Json(json!({
        "data": snapshots,
        "time_range": time_range.as_str(),
    })))
}

/// Load the scoring framework through the read-through cache.
async fn load_framework(
    state: &AppState,
) -> Result<Vec<crate::models::Category>, ErrorResponse> {
    {
        let cache = state.framework_cache.read().await;
        if let Some(ref cached) = *cache {
            if cached.is_fresh(FRAMEWORK_CACHE_TTL) {
                return Ok(cached.categories().to_vec());
            }
        }
    }

    let db = state.database.as_ref().ok_or_else(database_unavailable)?;
    let categories = db.get_framework().await.map_err(|e| {
        error!(error = %e, "Failed to load scoring framework");
        error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    let mut cache = state.framework_cache.write().await;
    *cache = Some(FrameworkCache::new(categories.clone()));

    Ok(categories)
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/themes", get(list_themes))
        .route("/api/themes/{id}", get(get_theme))
        .route("/api/themes/{id}/scores", get(list_theme_scores))
        .route("/api/themes/{id}/scores/{criteria_id}", put(upsert_score))
        .route("/api/themes/{id}/score", get(get_theme_score))
        .route("/api/framework", get(get_framework))
        .route("/api/momentum", get(theme_momentum))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let metrics = Arc::new(Metrics::new()?);
    let start_time = Arc::new(Instant::now());

    // Database is optional so /health and /metrics stay up while the
    // store is unreachable; data endpoints answer 503.
    let database = match ThemeDatabase::new().await {
        Ok(db) => {
            info!("Postgres connected for API server");
            Some(Arc::new(db))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to connect to Postgres - data endpoints will be unavailable");
            None
        }
    };

    let state = AppState {
        health: Arc::new(RwLock::new(HealthStatus::default())),
        metrics: metrics.clone(),
        start_time: start_time.clone(),
        database,
        framework_cache: Arc::new(RwLock::new(None)),
        momentum_cache: Arc::new(RwLock::new(None)),
    };
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    info!(
        "Metrics endpoint available at http://0.0.0.0:{}/metrics",
        port
    );
    axum::serve(listener, app).await?;

    Ok(())
}
