//! The saga plan: which step handles which state.

use std::collections::HashMap;
use std::sync::Arc;

use common::{OrderData, OrderId};

use crate::services::{OrderService, PaymentService, StockService};
use crate::state::OrderSagaState;
use crate::step::SagaStep;
use crate::steps::{CreatePaymentStep, DecreaseStockStep};

/// Ordered association of saga states to the step responsible for them,
/// built once per execution from the concrete order data.
///
/// A state with no registered step is terminal. Steps are removed from
/// the plan as they are taken, which is what makes each step run at most
/// once per direction.
#[derive(Default)]
pub struct SagaPlan {
    steps: HashMap<OrderSagaState, Box<dyn SagaStep>>,
}

impl SagaPlan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a step as the handler for a state, replacing any
    /// previous registration.
    pub fn register(&mut self, state: OrderSagaState, step: Box<dyn SagaStep>) {
        self.steps.insert(state, step);
    }

    /// Builds the order placement plan, handing each step the slice of
    /// order data it needs.
    pub fn for_order(
        order_id: OrderId,
        order: &OrderData,
        orders: Arc<dyn OrderService>,
        stock: Arc<dyn StockService>,
        payments: Arc<dyn PaymentService>,
    ) -> Self {
        let mut plan = Self::new();
        plan.register(
            OrderSagaState::DecreasingStock,
            Box::new(DecreaseStockStep::new(stock, order.order_items.clone())),
        );
        plan.register(
            OrderSagaState::CreatingPayment,
            Box::new(CreatePaymentStep::new(
                orders,
                payments,
                order_id,
                order.user_id,
            )),
        );
        plan
    }

    /// Removes and returns the step registered for a state.
    ///
    /// `None` means no step handles this state — the orchestrator treats
    /// that as a terminal stop condition, not an error.
    pub fn take(&mut self, state: OrderSagaState) -> Option<Box<dyn SagaStep>> {
        self.steps.remove(&state)
    }

    /// Returns true if a step is currently registered for the state.
    pub fn is_registered(&self, state: OrderSagaState) -> bool {
        self.steps.contains_key(&state)
    }

    /// Number of steps still registered.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if no steps are registered.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{InMemoryOrderService, InMemoryPaymentService, InMemoryStockService};
    use common::{OrderItem, UserId};

    fn order_plan() -> SagaPlan {
        let order = OrderData {
            user_id: UserId::new(1),
            order_items: vec![OrderItem::new(3u64, 2)],
        };
        SagaPlan::for_order(
            OrderId::new(42),
            &order,
            Arc::new(InMemoryOrderService::new()),
            Arc::new(InMemoryStockService::new()),
            Arc::new(InMemoryPaymentService::new()),
        )
    }

    #[test]
    fn order_plan_registers_the_two_forward_states() {
        let plan = order_plan();
        assert_eq!(plan.len(), 2);
        assert!(plan.is_registered(OrderSagaState::DecreasingStock));
        assert!(plan.is_registered(OrderSagaState::CreatingPayment));
    }

    #[test]
    fn terminal_states_have_no_step() {
        let plan = order_plan();
        assert!(!plan.is_registered(OrderSagaState::Completed));
        assert!(!plan.is_registered(OrderSagaState::CompensatingStock));
        assert!(!plan.is_registered(OrderSagaState::Cancelled));
    }

    #[test]
    fn take_removes_the_step() {
        let mut plan = order_plan();
        let step = plan.take(OrderSagaState::DecreasingStock).unwrap();
        assert_eq!(step.name(), "decrease_stock");
        assert!(plan.take(OrderSagaState::DecreasingStock).is_none());
        assert_eq!(plan.len(), 1);
    }
}
