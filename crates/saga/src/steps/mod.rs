//! Concrete saga steps for order placement.

pub mod create_payment;
pub mod decrease_stock;

pub use create_payment::CreatePaymentStep;
pub use decrease_stock::DecreaseStockStep;

use crate::error::GatewayError;

/// Logs a downstream failure at error level, one field set per outcome kind.
pub(crate) fn log_failure(step: &'static str, action: &str, err: &GatewayError) {
    match err {
        GatewayError::Rejected {
            endpoint,
            status,
            body,
        } => {
            tracing::error!(step, endpoint = %endpoint, status, body = %body, "{action} rejected");
        }
        GatewayError::Unreachable { endpoint, detail } => {
            tracing::error!(step, endpoint = %endpoint, detail = %detail, "{action} unreachable");
        }
    }
}
