//! Collapses a finished saga execution into a boundary response.

use chrono::{DateTime, Utc};
use common::OrderId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::state::OrderSagaState;

/// Aggregated outcome of a saga execution, as seen by the boundary layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SagaStatus {
    /// The saga reached the happy terminal state.
    #[serde(rename = "OK")]
    Ok,
    /// The saga ended in any other terminal state.
    #[serde(rename = "ERROR")]
    Error,
}

impl SagaStatus {
    /// Returns true for the success status.
    pub fn is_ok(&self) -> bool {
        matches!(self, SagaStatus::Ok)
    }
}

/// The boundary response for one saga execution.
///
/// Carries only the aggregated status, the final state and the last
/// recorded error — never a stack trace.
#[derive(Debug, Clone, Serialize)]
pub struct SagaReport {
    /// Aggregated status: `"OK"` or `"ERROR"` on the wire.
    pub status: SagaStatus,
    /// Unique id of this saga execution.
    pub saga_id: Uuid,
    /// The order the saga ran for.
    pub order_id: OrderId,
    /// The terminal state the execution stopped in.
    pub final_state: OrderSagaState,
    /// The last error recorded during the execution, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// When the execution started.
    pub started_at: DateTime<Utc>,
    /// Wall-clock duration of the execution in milliseconds.
    pub duration_ms: u64,
    /// Number of step transitions taken (forward and rollback).
    pub transitions: u32,
}

impl SagaReport {
    /// Maps a terminal state and the last recorded error to the boundary
    /// response. Pure: the happy terminal state yields [`SagaStatus::Ok`],
    /// everything else yields [`SagaStatus::Error`] with the error kept.
    pub fn from_terminal(
        saga_id: Uuid,
        order_id: OrderId,
        final_state: OrderSagaState,
        error: Option<String>,
        started_at: DateTime<Utc>,
        duration_ms: u64,
        transitions: u32,
    ) -> Self {
        let status = if final_state.is_success() {
            SagaStatus::Ok
        } else {
            SagaStatus::Error
        };
        Self {
            status,
            saga_id,
            order_id,
            final_state,
            error,
            started_at,
            duration_ms,
            transitions,
        }
    }

    /// Returns true if the saga completed successfully.
    pub fn is_ok(&self) -> bool {
        self.status.is_ok()
    }
}
