//! The saga step (handler) abstraction.

use async_trait::async_trait;

use crate::state::OrderSagaState;

/// The result of running a step in either direction: the next saga state,
/// plus the error that caused it when the transition is a failure path.
///
/// Steps never let a failure escape; whatever goes wrong inside a call is
/// logged and folded into the returned transition, so the orchestrator
/// only ever consumes state values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// The state the saga moves to next.
    pub next: OrderSagaState,
    /// Description of the failure that produced this transition, if any.
    pub error: Option<String>,
}

impl Transition {
    /// A clean transition to the given state.
    pub fn to(next: OrderSagaState) -> Self {
        Self { next, error: None }
    }

    /// A failure-path transition carrying the error that caused it.
    pub fn failed(next: OrderSagaState, error: impl Into<String>) -> Self {
        Self {
            next,
            error: Some(error.into()),
        }
    }
}

/// One stage of the saga: a forward action paired with its undo action.
///
/// A step instance is constructed per saga execution, used once per
/// direction, then discarded; it is never shared across executions.
#[async_trait]
pub trait SagaStep: Send + Sync {
    /// Step name used in logs.
    fn name(&self) -> &'static str;

    /// Performs the forward side effect and resolves to the next state.
    ///
    /// On success the returned state is the natural successor of the state
    /// this step is registered under; any other state signals failure.
    async fn run(&mut self) -> Transition;

    /// Performs the compensating action for this step's `run`.
    ///
    /// Must be safe to call even if `run` partially executed, and must
    /// return a deterministic next state even when the compensation itself
    /// fails — a stuck rollback chain is worse than a partially
    /// compensated one.
    async fn rollback(&mut self) -> Transition;
}
