//! Saga pattern implementation for order placement.
//!
//! This crate provides the saga interpreter for coordinating an order
//! across independent downstream services (stock, payment) with
//! compensating actions on failure instead of an atomic commit.
//!
//! The order placement saga follows these steps:
//! 1. Decrease stock (check the ordered items out of stock)
//! 2. Create payment
//!
//! If a step fails, previously completed steps are compensated in
//! reverse order and the order ends up cancelled.

pub mod error;
pub mod orchestrator;
pub mod plan;
pub mod report;
pub mod services;
pub mod state;
pub mod step;
pub mod steps;

pub use error::GatewayError;
pub use orchestrator::SagaOrchestrator;
pub use plan::SagaPlan;
pub use report::{SagaReport, SagaStatus};
pub use services::{
    InMemoryOrderService, InMemoryPaymentService, InMemoryStockService, OrderService,
    OrderSummary, PaymentCreated, PaymentRequest, PaymentService, StockOperation, StockService,
};
pub use state::OrderSagaState;
pub use step::{SagaStep, Transition};
