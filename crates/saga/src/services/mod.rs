//! Downstream service traits and in-memory implementations for saga steps.

pub mod orders;
pub mod payment;
pub mod stock;

pub use orders::{InMemoryOrderService, OrderService, OrderSummary};
pub use payment::{InMemoryPaymentService, PaymentCreated, PaymentRequest, PaymentService};
pub use stock::{InMemoryStockService, StockOperation, StockService};
