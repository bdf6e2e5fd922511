use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::observability::MetricsRegistry;
use crate::pipeline::{Orchestrator, PipelineError};

use super::request::unwrap_payload;
use super::response::{ErrorResponse, HealthResponse, ReadyResponse, RunResponse};

/// Shared application state.
pub struct AppState {
    /// Pipeline entry point; owns the evaluator and the two sinks
    pub orchestrator: Orchestrator,

    /// Run counters and latency buckets
    pub metrics: MetricsRegistry,

    /// Application start time
    pub start_time: Instant,

    /// Application version
    pub version: String,

    /// Latency budget in milliseconds for the submit endpoint
    pub latency_budget_ms: u64,
}

/// Create the application router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/v1/transactions", post(handle_submit))
        .route("/health", get(handle_health))
        .route("/ready", get(handle_ready))
        .route("/metrics", get(handle_metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handle transaction submissions.
async fn handle_submit(
    State(state): State<Arc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> axum::response::Response {
    let start = Instant::now();

    // Envelope handling happens once, here; the pipeline sees a flat payload
    let payload = match unwrap_payload(body) {
        Ok(payload) => payload,
        Err(e) => {
            let error = PipelineError::from(e);
            state.metrics.record_failure(&error);
            warn!(error = %error, "Rejected payload at ingress");

            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(error.to_string(), error.code())),
            )
                .into_response();
        }
    };

    match state.orchestrator.run(payload).await {
        Ok(outcome) => {
            state.metrics.record_outcome(outcome.status);
            state.metrics.record_latency(start);

            let elapsed = start.elapsed();
            if elapsed.as_millis() > state.latency_budget_ms as u128 {
                warn!(
                    run_id = %outcome.run_id,
                    latency_ms = elapsed.as_millis(),
                    budget_ms = state.latency_budget_ms,
                    "Run latency exceeded budget"
                );
            }

            info!(
                run_id = %outcome.run_id,
                sender = %outcome.sender,
                status = %outcome.status,
                sink = %outcome.sink,
                latency_ms = elapsed.as_millis(),
                "Run completed"
            );

            (StatusCode::OK, Json(RunResponse::from(outcome))).into_response()
        }
        Err(failure) => {
            state.metrics.record_failure(&failure.error);
            state.metrics.record_latency(start);

            warn!(
                run_id = %failure.run_id,
                stage = %failure.stage,
                error = %failure.error,
                "Run failed"
            );

            let status = match failure.error {
                PipelineError::Validation(_) => StatusCode::BAD_REQUEST,
                PipelineError::Persistence(_) => StatusCode::BAD_GATEWAY,
            };

            (status, Json(ErrorResponse::from_failure(&failure))).into_response()
        }
    }
}

/// Health check endpoint.
async fn handle_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// Readiness check endpoint.
async fn handle_ready(State(state): State<Arc<AppState>>) -> axum::response::Response {
    let config = state.orchestrator.evaluator().config();

    // A pipeline with nothing to screen against is considered misconfigured
    if config.watchlist.is_empty() {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse::new("No watchlist loaded", "NOT_READY")),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        Json(ReadyResponse {
            ready: true,
            watchlist_entries: config.watchlist.len(),
            amount_threshold: config.amount_threshold.to_string(),
        }),
    )
        .into_response()
}

/// Metrics endpoint (Prometheus format).
async fn handle_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let body = state
        .metrics
        .to_prometheus(state.start_time.elapsed().as_secs());

    (
        StatusCode::OK,
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; charset=utf-8",
        )],
        body,
    )
}
