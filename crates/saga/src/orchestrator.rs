//! The saga orchestrator: drives steps forward and unwinds on failure.

use std::sync::Arc;

use chrono::Utc;
use common::{OrderData, OrderId};
use uuid::Uuid;

use crate::plan::SagaPlan;
use crate::report::SagaReport;
use crate::services::{OrderService, PaymentService, StockService};
use crate::state::OrderSagaState;
use crate::step::SagaStep;

/// Transient bookkeeping owned by a single execution: the current state,
/// the steps that completed their forward action (in completion order),
/// and the latest error. Dropped when the execution returns.
struct Execution {
    state: OrderSagaState,
    completed: Vec<Box<dyn SagaStep>>,
    last_error: Option<String>,
    transitions: u32,
}

impl Execution {
    fn new() -> Self {
        Self {
            state: OrderSagaState::entry(),
            completed: Vec::new(),
            last_error: None,
            transitions: 0,
        }
    }

    fn record(&mut self, error: Option<String>) {
        self.transitions += 1;
        if let Some(error) = error {
            self.last_error = Some(error);
        }
    }
}

/// Drives order placement sagas against the injected downstream services.
///
/// The orchestrator performs no I/O of its own — it looks up the step for
/// the current state, executes it, and follows the state it returns until
/// a terminal state is reached. Steps that completed their forward action
/// are tracked so their compensations can run in reverse order when a
/// later step fails. Each step runs at most once per direction; there are
/// no orchestrator-level retries.
#[derive(Clone)]
pub struct SagaOrchestrator {
    orders: Arc<dyn OrderService>,
    stock: Arc<dyn StockService>,
    payments: Arc<dyn PaymentService>,
}

impl SagaOrchestrator {
    /// Creates an orchestrator over the given downstream services.
    pub fn new(
        orders: Arc<dyn OrderService>,
        stock: Arc<dyn StockService>,
        payments: Arc<dyn PaymentService>,
    ) -> Self {
        Self {
            orders,
            stock,
            payments,
        }
    }

    /// Runs the order placement saga for one order.
    ///
    /// Always resolves to a report; downstream failures surface as an
    /// `ERROR` status with the last recorded error, never as a panic or
    /// an `Err`.
    #[tracing::instrument(skip(self, order), fields(saga_type = "OrderPlacement"))]
    pub async fn run(&self, order_id: OrderId, order: OrderData) -> SagaReport {
        let plan = SagaPlan::for_order(
            order_id,
            &order,
            self.orders.clone(),
            self.stock.clone(),
            self.payments.clone(),
        );
        self.execute(order_id, plan).await
    }

    /// Drives an arbitrary plan to a terminal state.
    ///
    /// Forward pass: take the step registered for the current state (no
    /// step means terminal), run it, and keep it as completed only when
    /// it reached its natural successor. Any other returned state switches
    /// to the rollback pass, which pops completed steps in reverse order.
    pub async fn execute(&self, order_id: OrderId, mut plan: SagaPlan) -> SagaReport {
        metrics::counter!("saga_executions_total").increment(1);
        let saga_id = Uuid::new_v4();
        let started_at = Utc::now();
        let saga_start = std::time::Instant::now();

        let mut exec = Execution::new();
        while let Some(mut step) = plan.take(exec.state) {
            tracing::info!(%saga_id, step = step.name(), state = %exec.state, "saga step started");
            let transition = step.run().await;
            let forward = exec.state.successor() == Some(transition.next);
            exec.state = transition.next;
            exec.record(transition.error);

            if forward {
                exec.completed.push(step);
            } else {
                // The failing step never completed, so it is dropped
                // rather than rolled back.
                self.unwind(saga_id, &mut exec).await;
                break;
            }
        }

        let duration_ms = saga_start.elapsed().as_millis() as u64;
        metrics::histogram!("saga_duration_seconds").record(saga_start.elapsed().as_secs_f64());
        if exec.state.is_success() {
            metrics::counter!("saga_completed").increment(1);
            tracing::info!(%saga_id, %order_id, duration_ms, "saga completed successfully");
        } else {
            metrics::counter!("saga_failed").increment(1);
            tracing::warn!(
                %saga_id,
                %order_id,
                final_state = %exec.state,
                error = exec.last_error.as_deref().unwrap_or("unknown"),
                "saga failed"
            );
        }

        SagaReport::from_terminal(
            saga_id,
            order_id,
            exec.state,
            exec.last_error,
            started_at,
            duration_ms,
            exec.transitions,
        )
    }

    /// Runs compensations for completed steps in reverse (LIFO) order,
    /// following each rollback's returned state, until the stack is empty
    /// or a terminal state is reached.
    async fn unwind(&self, saga_id: Uuid, exec: &mut Execution) {
        while let Some(mut step) = exec.completed.pop() {
            tracing::info!(%saga_id, step = step.name(), state = %exec.state, "rolling back saga step");
            let transition = step.rollback().await;
            exec.state = transition.next;
            exec.record(transition.error);

            if exec.state.is_terminal() {
                break;
            }
        }
    }
}
