//! Saga trigger endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use common::{OrderData, OrderId, OrderItem, UserId};
use saga::{SagaOrchestrator, SagaReport};
use serde::Deserialize;

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub orchestrator: SagaOrchestrator,
}

/// Request body for starting an order saga.
#[derive(Deserialize)]
pub struct StartSagaRequest {
    pub order_id: OrderId,
    pub user_id: UserId,
    pub order_items: Vec<OrderItem>,
}

/// POST /saga/order — runs the order placement saga to completion.
///
/// Returns 200 with the report when the saga completed, 500 with the
/// report when it ended in any other terminal state.
#[tracing::instrument(skip(state, req))]
pub async fn start(
    State(state): State<Arc<AppState>>,
    Json(req): Json<StartSagaRequest>,
) -> Result<(StatusCode, Json<SagaReport>), ApiError> {
    if req.order_items.is_empty() {
        return Err(ApiError::BadRequest("order has no items".to_string()));
    }

    let order = OrderData::new(req.user_id, req.order_items);
    let orchestrator = state.orchestrator.clone();
    let order_id = req.order_id;

    // Detached task: a client disconnect must not abandon an in-flight
    // downstream call, only the response delivery may be skipped.
    let report = tokio::spawn(async move { orchestrator.run(order_id, order).await })
        .await
        .map_err(|e| ApiError::Internal(format!("saga task failed: {e}")))?;

    let code = if report.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    Ok((code, Json(report)))
}
