//! Step: create a payment transaction for the order.

use std::sync::Arc;

use async_trait::async_trait;
use common::{OrderId, UserId};

use crate::services::{OrderService, PaymentRequest, PaymentService};
use crate::state::OrderSagaState;
use crate::step::{SagaStep, Transition};
use crate::steps::log_failure;

/// Looks up the order's total amount and creates a payment transaction
/// for it.
pub struct CreatePaymentStep {
    orders: Arc<dyn OrderService>,
    payments: Arc<dyn PaymentService>,
    order_id: OrderId,
    user_id: UserId,
    total_amount: f64,
    payment_id: u64,
}

impl CreatePaymentStep {
    /// Creates the step for the given order and user.
    pub fn new(
        orders: Arc<dyn OrderService>,
        payments: Arc<dyn PaymentService>,
        order_id: OrderId,
        user_id: UserId,
    ) -> Self {
        Self {
            orders,
            payments,
            order_id,
            user_id,
            total_amount: 0.0,
            payment_id: 0,
        }
    }

    /// The amount charged, populated once the order has been fetched.
    pub fn total_amount(&self) -> f64 {
        self.total_amount
    }

    /// The payment id assigned downstream, populated on success.
    pub fn payment_id(&self) -> u64 {
        self.payment_id
    }
}

#[async_trait]
impl SagaStep for CreatePaymentStep {
    fn name(&self) -> &'static str {
        "create_payment"
    }

    async fn run(&mut self) -> Transition {
        let summary = match self.orders.fetch_order(self.order_id).await {
            Ok(summary) => summary,
            Err(err) => {
                log_failure(self.name(), "order lookup", &err);
                return Transition::failed(OrderSagaState::CompensatingStock, err.to_string());
            }
        };
        self.total_amount = summary.total_amount;

        let request = PaymentRequest {
            user_id: self.user_id,
            order_id: self.order_id,
            total_amount: self.total_amount,
        };
        match self.payments.create_payment(&request).await {
            Ok(created) => {
                self.payment_id = created.payment_id;
                tracing::debug!(
                    step = self.name(),
                    payment_id = self.payment_id,
                    "payment creation succeeded"
                );
                Transition::to(OrderSagaState::Completed)
            }
            Err(err) => {
                log_failure(self.name(), "payment creation", &err);
                // Stock was already decremented by the previous step, so
                // the failure path goes through its compensation.
                Transition::failed(OrderSagaState::CompensatingStock, err.to_string())
            }
        }
    }

    async fn rollback(&mut self) -> Transition {
        // Only reachable once a step after payment exists in the plan;
        // the payment service has no deletion to perform until then.
        tracing::debug!(step = self.name(), "payment deletion succeeded");
        Transition::to(OrderSagaState::CompensatingStock)
    }
}
