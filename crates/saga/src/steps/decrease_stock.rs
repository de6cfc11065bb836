//! Step: check the ordered items out of stock.

use std::sync::Arc;

use async_trait::async_trait;
use common::OrderItem;

use crate::services::{StockOperation, StockService};
use crate::state::OrderSagaState;
use crate::step::{SagaStep, Transition};
use crate::steps::log_failure;

/// Checks the ordered items out of stock; its rollback checks the same
/// items back in.
pub struct DecreaseStockStep {
    stock: Arc<dyn StockService>,
    items: Vec<OrderItem>,
}

impl DecreaseStockStep {
    /// Creates the step for the given item list.
    pub fn new(stock: Arc<dyn StockService>, items: Vec<OrderItem>) -> Self {
        Self { stock, items }
    }
}

#[async_trait]
impl SagaStep for DecreaseStockStep {
    fn name(&self) -> &'static str {
        "decrease_stock"
    }

    async fn run(&mut self) -> Transition {
        match self
            .stock
            .adjust(&self.items, StockOperation::CheckOut)
            .await
        {
            Ok(()) => {
                tracing::debug!(step = self.name(), "stock check-out succeeded");
                Transition::to(OrderSagaState::CreatingPayment)
            }
            Err(err) => {
                log_failure(self.name(), "stock check-out", &err);
                // Nothing was decremented, so there is nothing to compensate.
                Transition::failed(OrderSagaState::Cancelled, err.to_string())
            }
        }
    }

    async fn rollback(&mut self) -> Transition {
        match self
            .stock
            .adjust(&self.items, StockOperation::CheckIn)
            .await
        {
            Ok(()) => {
                tracing::debug!(step = self.name(), "stock check-in succeeded");
                Transition::to(OrderSagaState::Cancelled)
            }
            Err(err) => {
                log_failure(self.name(), "stock check-in", &err);
                // The rollback chain must keep moving even when a
                // compensation fails.
                Transition::failed(OrderSagaState::Cancelled, err.to_string())
            }
        }
    }
}
