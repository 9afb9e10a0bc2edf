//! Disease Screening API Server
//!
//! JSON API behind the screening tabs: home/help content, per-disease form
//! schemas and the "Diagnose" action.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use data_validator::Validator;
use inference_engine::PredictionEngine;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_governor::GovernorLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

pub mod config;
mod error;
pub mod rate_limit;
mod routes;

pub use config::AppConfig;
pub use error::{ApiError, ErrorBody};
pub use routes::diagnose::{DiagnoseRequest, DiagnoseResponse};

/// Application state shared across handlers. Read-only after startup
/// apart from the prediction counter.
pub struct AppState {
    /// Loaded scalers and classifiers
    pub engine: Arc<PredictionEngine>,
    /// Form bounds checker
    pub validator: Validator,
    /// Pacing delay before each diagnose result
    pub diagnose_delay: Duration,
    /// Prometheus handle when the recorder is installed
    pub metrics: Option<PrometheusHandle>,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: Instant,
    /// Successful predictions served
    prediction_count: AtomicU64,
}

impl AppState {
    /// Create new application state
    pub fn new(engine: PredictionEngine, config: &AppConfig) -> Self {
        Self {
            engine: Arc::new(engine),
            validator: Validator::new(config.diagnosis.enforce_choices),
            diagnose_delay: config.diagnosis.delay(),
            metrics: None,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: Instant::now(),
            prediction_count: AtomicU64::new(0),
        }
    }

    /// Attach the Prometheus handle used by `/metrics`
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Count one served prediction
    pub fn record_prediction(&self) -> u64 {
        self.prediction_count.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Predictions served since start
    pub fn prediction_count(&self) -> u64 {
        self.prediction_count.load(Ordering::Relaxed)
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub models: Vec<ModelHealth>,
    pub prediction_count: u64,
}

/// Loaded model summary
#[derive(Debug, Serialize)]
pub struct ModelHealth {
    pub disease: clinical_features::Disease,
    pub classifier: &'static str,
    pub features: usize,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/home", get(routes::home::get_home))
        .route("/api/v1/diseases", get(routes::diseases::list_diseases))
        .route("/api/v1/diseases/:disease/form", get(routes::diseases::get_form))
        .route("/api/v1/diseases/:disease/diagnose", post(routes::diagnose::diagnose))
        .route("/metrics", get(metrics_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let models = state
        .engine
        .store()
        .bundles()
        .map(|b| ModelHealth {
            disease: b.disease,
            classifier: b.classifier.kind(),
            features: b.dimension(),
        })
        .collect();

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        models,
        prediction_count: state.prediction_count(),
    })
}

/// Prometheus exposition
async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => (StatusCode::NOT_FOUND, "metrics disabled").into_response(),
    }
}

/// Initialize logging
pub fn init_logging(config: &config::LoggingConfig) -> Result<(), ApiError> {
    let level: Level = config
        .level
        .parse()
        .map_err(|_| ApiError::Configuration(format!("invalid log level: {}", config.level)))?;

    let result = if config.json {
        let subscriber = FmtSubscriber::builder()
            .json()
            .with_max_level(level)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    } else {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(level)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    };

    result.map_err(|e| ApiError::Server(format!("failed to set tracing subscriber: {}", e)))
}

/// Load artifacts, then serve until the listener fails. Artifact errors
/// abort before the port is bound.
pub async fn run_server(config: AppConfig) -> Result<(), ApiError> {
    let paths = config.models.artifact_paths()?;
    let engine = PredictionEngine::load(&paths)?;

    let mut state = AppState::new(engine, &config);
    if config.metrics.enabled {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .map_err(|e| ApiError::Server(format!("failed to install metrics recorder: {}", e)))?;
        state = state.with_metrics(handle);
    }

    let addr: SocketAddr = config
        .server
        .addr
        .parse()
        .map_err(|e| ApiError::Configuration(format!("invalid server.addr {}: {}", config.server.addr, e)))?;

    let mut app = create_router(Arc::new(state));
    if config.rate_limit.enabled {
        let governor = rate_limit::create_governor_config(&config.rate_limit)?;
        app = app.layer(GovernorLayer { config: governor });
    }

    info!("Starting API server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;

    Ok(())
}
