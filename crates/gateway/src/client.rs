//! The API gateway HTTP client.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use common::{OrderId, OrderItem};
use saga::{
    GatewayError, OrderService, OrderSummary, PaymentCreated, PaymentRequest, PaymentService,
    StockOperation, StockService,
};

use crate::config::GatewayConfig;
use crate::retry::retry_send;

/// HTTP client for the downstream services behind the API gateway.
///
/// Wraps a single `reqwest::Client` with the configured base URL and
/// per-request timeout, and implements the saga's three service traits.
/// Designed to be shared via `Arc` across concurrent saga executions.
#[derive(Debug, Clone)]
pub struct ApiGatewayClient {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
}

impl ApiGatewayClient {
    /// Builds a client from configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_retries: config.max_retries,
        })
    }

    /// Sends a request with bounded retry, mapping transport errors to
    /// the unreachable outcome.
    async fn send<F, Fut>(&self, endpoint: &str, f: F) -> Result<reqwest::Response, GatewayError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<reqwest::Response, reqwest::Error>>,
    {
        retry_send(self.max_retries, f).await.map_err(|e| {
            let detail = if e.is_timeout() {
                format!("timed out: {e}")
            } else {
                e.to_string()
            };
            GatewayError::unreachable(endpoint, detail)
        })
    }

    /// Classifies a response: success passes through, anything else
    /// becomes a rejection carrying the extracted error payload.
    async fn check_status(
        endpoint: &str,
        resp: reqwest::Response,
    ) -> Result<reqwest::Response, GatewayError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = error_body(resp).await;
        Err(GatewayError::rejected(endpoint, status.as_u16(), body))
    }
}

/// Extracts an error payload from a response body: the structured JSON
/// form when the body parses, the raw text otherwise. Never fails.
async fn error_body(resp: reqwest::Response) -> String {
    let text = resp.text().await.unwrap_or_default();
    match serde_json::from_str::<serde_json::Value>(&text) {
        Ok(value) => value.to_string(),
        Err(_) => text,
    }
}

/// Reads a `total_amount` field defensively: JSON numbers and numeric
/// strings are accepted, anything else (missing, malformed) is `0.0`.
fn coerce_amount(value: Option<&serde_json::Value>) -> f64 {
    match value {
        Some(serde_json::Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(serde_json::Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

#[async_trait]
impl OrderService for ApiGatewayClient {
    async fn fetch_order(&self, order_id: OrderId) -> Result<OrderSummary, GatewayError> {
        let endpoint = format!("/orders/{order_id}");
        let url = format!("{}{endpoint}", self.base_url);

        let resp = self.send(&endpoint, || self.client.get(&url).send()).await?;
        let resp = Self::check_status(&endpoint, resp).await?;

        let payload: serde_json::Value = resp.json().await.map_err(|e| {
            GatewayError::unreachable(&endpoint, format!("malformed response body: {e}"))
        })?;
        Ok(OrderSummary {
            total_amount: coerce_amount(payload.get("total_amount")),
        })
    }
}

#[async_trait]
impl StockService for ApiGatewayClient {
    async fn adjust(
        &self,
        items: &[OrderItem],
        operation: StockOperation,
    ) -> Result<(), GatewayError> {
        let endpoint = "/stocks";
        let url = format!("{}{endpoint}", self.base_url);
        let body = serde_json::json!({
            "items": items,
            "operation": operation,
        });

        let resp = self
            .send(endpoint, || self.client.post(&url).json(&body).send())
            .await?;
        Self::check_status(endpoint, resp).await?;
        Ok(())
    }
}

#[async_trait]
impl PaymentService for ApiGatewayClient {
    async fn create_payment(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentCreated, GatewayError> {
        let endpoint = "/payments";
        let url = format!("{}{endpoint}", self.base_url);

        let resp = self
            .send(endpoint, || self.client.post(&url).json(request).send())
            .await?;
        let resp = Self::check_status(endpoint, resp).await?;

        // A success without a usable payment id is still a success.
        let payment_id = resp
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|v| v.get("payment_id").and_then(serde_json::Value::as_u64))
            .unwrap_or(0);
        Ok(PaymentCreated { payment_id })
    }
}
