//! Order lookup trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::OrderId;

use crate::error::GatewayError;

/// The slice of an order payload the saga needs.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    /// Total amount to charge for the order.
    pub total_amount: f64,
}

/// Trait for reading orders from the store manager.
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Fetches the order payload for the given order.
    async fn fetch_order(&self, order_id: OrderId) -> Result<OrderSummary, GatewayError>;
}

#[derive(Debug, Default)]
struct InMemoryOrderState {
    orders: HashMap<OrderId, f64>,
    fetch_count: u32,
    failure: Option<GatewayError>,
}

/// In-memory order store for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderService {
    state: Arc<RwLock<InMemoryOrderState>>,
}

impl InMemoryOrderService {
    /// Creates a new in-memory order store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an order with its total amount.
    pub fn insert_order(&self, order_id: OrderId, total_amount: f64) {
        self.state
            .write()
            .unwrap()
            .orders
            .insert(order_id, total_amount);
    }

    /// Configures the next fetch calls to fail with the given outcome.
    pub fn set_fetch_failure(&self, failure: GatewayError) {
        self.state.write().unwrap().failure = Some(failure);
    }

    /// Returns the number of fetch calls made.
    pub fn fetch_count(&self) -> u32 {
        self.state.read().unwrap().fetch_count
    }
}

#[async_trait]
impl OrderService for InMemoryOrderService {
    async fn fetch_order(&self, order_id: OrderId) -> Result<OrderSummary, GatewayError> {
        let mut state = self.state.write().unwrap();
        state.fetch_count += 1;

        if let Some(failure) = state.failure.clone() {
            return Err(failure);
        }

        match state.orders.get(&order_id) {
            Some(&total_amount) => Ok(OrderSummary { total_amount }),
            None => Err(GatewayError::rejected(
                format!("/orders/{order_id}"),
                404,
                format!("{{\"error\":\"order {order_id} not found\"}}"),
            )),
        }
    }
}
