//! Stock adjustment trait and in-memory implementation.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::OrderItem;
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// Direction of a stock adjustment, serialized to the wire operation the
/// store manager consumes (`"-"` decrements, `"+"` increments).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockOperation {
    /// Check items out of stock (decrement).
    #[serde(rename = "-")]
    CheckOut,
    /// Check items back into stock (increment).
    #[serde(rename = "+")]
    CheckIn,
}

impl StockOperation {
    /// Returns the wire form of the operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            StockOperation::CheckOut => "-",
            StockOperation::CheckIn => "+",
        }
    }
}

/// Trait for stock check-out and check-in operations.
#[async_trait]
pub trait StockService: Send + Sync {
    /// Adjusts stock for the given items in the given direction.
    async fn adjust(
        &self,
        items: &[OrderItem],
        operation: StockOperation,
    ) -> Result<(), GatewayError>;
}

#[derive(Debug, Default)]
struct InMemoryStockState {
    adjustments: Vec<(StockOperation, Vec<OrderItem>)>,
    check_out_failure: Option<GatewayError>,
    check_in_failure: Option<GatewayError>,
}

/// In-memory stock service for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStockService {
    state: Arc<RwLock<InMemoryStockState>>,
}

impl InMemoryStockService {
    /// Creates a new in-memory stock service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures check-out calls to fail with the given outcome.
    pub fn set_check_out_failure(&self, failure: GatewayError) {
        self.state.write().unwrap().check_out_failure = Some(failure);
    }

    /// Configures check-in calls to fail with the given outcome.
    pub fn set_check_in_failure(&self, failure: GatewayError) {
        self.state.write().unwrap().check_in_failure = Some(failure);
    }

    /// Returns the number of check-out calls made.
    pub fn check_out_count(&self) -> usize {
        self.count(StockOperation::CheckOut)
    }

    /// Returns the number of check-in calls made.
    pub fn check_in_count(&self) -> usize {
        self.count(StockOperation::CheckIn)
    }

    /// Returns the items of the most recent check-in call, if any.
    pub fn last_check_in(&self) -> Option<Vec<OrderItem>> {
        self.state
            .read()
            .unwrap()
            .adjustments
            .iter()
            .rev()
            .find(|(op, _)| *op == StockOperation::CheckIn)
            .map(|(_, items)| items.clone())
    }

    fn count(&self, operation: StockOperation) -> usize {
        self.state
            .read()
            .unwrap()
            .adjustments
            .iter()
            .filter(|(op, _)| *op == operation)
            .count()
    }
}

#[async_trait]
impl StockService for InMemoryStockService {
    async fn adjust(
        &self,
        items: &[OrderItem],
        operation: StockOperation,
    ) -> Result<(), GatewayError> {
        let mut state = self.state.write().unwrap();

        let failure = match operation {
            StockOperation::CheckOut => state.check_out_failure.clone(),
            StockOperation::CheckIn => state.check_in_failure.clone(),
        };
        if let Some(failure) = failure {
            return Err(failure);
        }

        state.adjustments.push((operation, items.to_vec()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<OrderItem> {
        vec![OrderItem::new(1u64, 2), OrderItem::new(5u64, 1)]
    }

    #[test]
    fn operation_wire_form() {
        assert_eq!(StockOperation::CheckOut.as_str(), "-");
        assert_eq!(StockOperation::CheckIn.as_str(), "+");
        assert_eq!(
            serde_json::to_string(&StockOperation::CheckOut).unwrap(),
            "\"-\""
        );
        assert_eq!(
            serde_json::to_string(&StockOperation::CheckIn).unwrap(),
            "\"+\""
        );
    }

    #[tokio::test]
    async fn adjust_records_direction_and_items() {
        let service = InMemoryStockService::new();

        service
            .adjust(&items(), StockOperation::CheckOut)
            .await
            .unwrap();
        service
            .adjust(&items(), StockOperation::CheckIn)
            .await
            .unwrap();

        assert_eq!(service.check_out_count(), 1);
        assert_eq!(service.check_in_count(), 1);
        assert_eq!(service.last_check_in(), Some(items()));
    }

    #[tokio::test]
    async fn check_out_failure_does_not_affect_check_in() {
        let service = InMemoryStockService::new();
        service.set_check_out_failure(GatewayError::rejected("/stocks", 409, "conflict"));

        let err = service
            .adjust(&items(), StockOperation::CheckOut)
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Rejected { status: 409, .. }));

        service
            .adjust(&items(), StockOperation::CheckIn)
            .await
            .unwrap();
        assert_eq!(service.check_out_count(), 0);
        assert_eq!(service.check_in_count(), 1);
    }
}
