//! HTTP boundary for the order saga orchestrator.
//!
//! Exposes the saga trigger endpoint with structured logging (tracing)
//! and Prometheus metrics. The saga core stays independent of this crate;
//! the boundary only translates requests and reports.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use gateway::{ApiGatewayClient, GatewayConfig};
use metrics_exporter_prometheus::PrometheusHandle;
use saga::SagaOrchestrator;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::saga::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/saga/order", post(routes::saga::start))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state with an orchestrator wired to the real
/// HTTP gateway.
pub fn create_gateway_state(config: GatewayConfig) -> Result<Arc<AppState>, reqwest::Error> {
    let client = Arc::new(ApiGatewayClient::new(config)?);
    let orchestrator = SagaOrchestrator::new(client.clone(), client.clone(), client);
    Ok(Arc::new(AppState { orchestrator }))
}
