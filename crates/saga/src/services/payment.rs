//! Payment service trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::{OrderId, UserId};
use serde::Serialize;

use crate::error::GatewayError;

/// The payload sent to the payment service to create a transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentRequest {
    /// The user being charged.
    pub user_id: UserId,
    /// The order being paid for.
    pub order_id: OrderId,
    /// Amount to charge.
    pub total_amount: f64,
}

/// Result of a successful payment creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentCreated {
    /// The payment ID assigned by the payment service.
    ///
    /// Zero when the service answered success without a usable id.
    pub payment_id: u64,
}

/// Trait for payment creation.
#[async_trait]
pub trait PaymentService: Send + Sync {
    /// Creates a payment transaction for an order.
    async fn create_payment(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentCreated, GatewayError>;
}

#[derive(Debug, Default)]
struct InMemoryPaymentState {
    payments: HashMap<u64, PaymentRequest>,
    next_id: u64,
    failure: Option<GatewayError>,
}

/// In-memory payment service for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentService {
    state: Arc<RwLock<InMemoryPaymentState>>,
}

impl InMemoryPaymentService {
    /// Creates a new in-memory payment service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures create calls to fail with the given outcome.
    pub fn set_create_failure(&self, failure: GatewayError) {
        self.state.write().unwrap().failure = Some(failure);
    }

    /// Returns the number of payments created.
    pub fn payment_count(&self) -> usize {
        self.state.read().unwrap().payments.len()
    }

    /// Returns the request of the most recently created payment, if any.
    pub fn last_request(&self) -> Option<PaymentRequest> {
        let state = self.state.read().unwrap();
        state.payments.get(&state.next_id).cloned()
    }
}

#[async_trait]
impl PaymentService for InMemoryPaymentService {
    async fn create_payment(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentCreated, GatewayError> {
        let mut state = self.state.write().unwrap();

        if let Some(failure) = state.failure.clone() {
            return Err(failure);
        }

        state.next_id += 1;
        let payment_id = state.next_id;
        state.payments.insert(payment_id, request.clone());

        Ok(PaymentCreated { payment_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PaymentRequest {
        PaymentRequest {
            user_id: UserId::new(1),
            order_id: OrderId::new(42),
            total_amount: 100.0,
        }
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids() {
        let service = InMemoryPaymentService::new();

        let p1 = service.create_payment(&request()).await.unwrap();
        let p2 = service.create_payment(&request()).await.unwrap();

        assert_eq!(p1.payment_id, 1);
        assert_eq!(p2.payment_id, 2);
        assert_eq!(service.payment_count(), 2);
    }

    #[tokio::test]
    async fn create_records_the_request() {
        let service = InMemoryPaymentService::new();
        service.create_payment(&request()).await.unwrap();

        assert_eq!(service.last_request(), Some(request()));
    }

    #[tokio::test]
    async fn configured_failure_creates_nothing() {
        let service = InMemoryPaymentService::new();
        service.set_create_failure(GatewayError::rejected("/payments", 500, "boom"));

        let err = service.create_payment(&request()).await.unwrap_err();
        assert!(matches!(err, GatewayError::Rejected { status: 500, .. }));
        assert_eq!(service.payment_count(), 0);
    }

    #[test]
    fn request_wire_shape() {
        let json = serde_json::to_value(request()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"user_id": 1, "order_id": 42, "total_amount": 100.0})
        );
    }
}
