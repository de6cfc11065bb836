//! Saga state machine for order placement.

use serde::{Deserialize, Serialize};

/// The state of an order placement saga, named after what happens next.
///
/// State transitions:
/// ```text
/// DecreasingStock ──► CreatingPayment ──► Completed
///        │                   │
///        ▼                   ▼
///    Cancelled ◄── CompensatingStock
/// ```
///
/// `Cancelled` is reached directly when the stock check-out fails (nothing
/// was decremented, nothing to undo). `CompensatingStock` is reached when
/// payment fails after a completed check-out and marks the pending stock
/// check-in. The two are deliberately distinct states so stock is never
/// re-incremented unless it was actually decremented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderSagaState {
    /// The ordered items are being checked out of stock.
    DecreasingStock,

    /// A payment transaction is being created for the order.
    CreatingPayment,

    /// All steps completed successfully (terminal state).
    Completed,

    /// Payment failed after stock was decremented; the check-in
    /// compensation is pending.
    CompensatingStock,

    /// The order was cancelled, forward progress and compensation are
    /// both finished (terminal state).
    Cancelled,
}

impl OrderSagaState {
    /// The state a fresh saga execution starts in.
    pub fn entry() -> Self {
        OrderSagaState::DecreasingStock
    }

    /// The natural forward successor of this state, if any.
    ///
    /// A step signals forward progress by returning exactly this state;
    /// anything else is a failure-path transition.
    pub fn successor(&self) -> Option<OrderSagaState> {
        match self {
            OrderSagaState::DecreasingStock => Some(OrderSagaState::CreatingPayment),
            OrderSagaState::CreatingPayment => Some(OrderSagaState::Completed),
            OrderSagaState::Completed
            | OrderSagaState::CompensatingStock
            | OrderSagaState::Cancelled => None,
        }
    }

    /// Returns true if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderSagaState::Completed | OrderSagaState::Cancelled)
    }

    /// Returns true if this is the happy terminal state.
    pub fn is_success(&self) -> bool {
        matches!(self, OrderSagaState::Completed)
    }

    /// Returns the state name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSagaState::DecreasingStock => "DecreasingStock",
            OrderSagaState::CreatingPayment => "CreatingPayment",
            OrderSagaState::Completed => "Completed",
            OrderSagaState::CompensatingStock => "CompensatingStock",
            OrderSagaState::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for OrderSagaState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
