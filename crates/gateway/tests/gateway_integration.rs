//! Integration tests for the gateway client against wiremock servers,
//! covering request construction, response parsing and the three
//! downstream outcome kinds.

use common::{OrderId, OrderItem, UserId};
use gateway::{ApiGatewayClient, GatewayConfig};
use saga::{
    GatewayError, OrderService, PaymentRequest, PaymentService, StockOperation, StockService,
};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiGatewayClient {
    let mut config = GatewayConfig::new(server.uri());
    config.max_retries = 0;
    ApiGatewayClient::new(config).expect("client build")
}

fn items() -> Vec<OrderItem> {
    vec![OrderItem::new(1u64, 2), OrderItem::new(5u64, 1)]
}

// ── Order lookup ─────────────────────────────────────────────────────────

#[tokio::test]
async fn fetch_order_reads_the_total_amount() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 42,
            "user_id": 1,
            "total_amount": 100.0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let summary = client_for(&server)
        .fetch_order(OrderId::new(42))
        .await
        .unwrap();
    assert_eq!(summary.total_amount, 100.0);
}

#[tokio::test]
async fn fetch_order_coerces_numeric_strings() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders/42"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"total_amount": "59.90"})),
        )
        .mount(&server)
        .await;

    let summary = client_for(&server)
        .fetch_order(OrderId::new(42))
        .await
        .unwrap();
    assert_eq!(summary.total_amount, 59.90);
}

#[tokio::test]
async fn fetch_order_defaults_a_malformed_total_to_zero() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders/42"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"total_amount": "not-a-number"})),
        )
        .mount(&server)
        .await;

    let summary = client_for(&server)
        .fetch_order(OrderId::new(42))
        .await
        .unwrap();
    assert_eq!(summary.total_amount, 0.0);
}

#[tokio::test]
async fn fetch_order_defaults_a_missing_total_to_zero() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": 42})))
        .mount(&server)
        .await;

    let summary = client_for(&server)
        .fetch_order(OrderId::new(42))
        .await
        .unwrap();
    assert_eq!(summary.total_amount, 0.0);
}

#[tokio::test]
async fn fetch_order_rejection_carries_the_json_error_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders/42"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"error": "order not found"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_order(OrderId::new(42))
        .await
        .unwrap_err();
    match err {
        GatewayError::Rejected { status, body, .. } => {
            assert_eq!(status, 404);
            assert!(body.contains("order not found"));
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn fetch_order_rejection_falls_back_to_raw_text_payloads() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders/42"))
        .respond_with(ResponseTemplate::new(500).set_body_string("gateway exploded"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_order(OrderId::new(42))
        .await
        .unwrap_err();
    match err {
        GatewayError::Rejected { status, body, .. } => {
            assert_eq!(status, 500);
            assert_eq!(body, "gateway exploded");
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

// ── Stock adjustment ─────────────────────────────────────────────────────

#[tokio::test]
async fn check_out_posts_the_decrement_operation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/stocks"))
        .and(body_json(serde_json::json!({
            "items": [
                {"item_id": 1, "quantity": 2},
                {"item_id": 5, "quantity": 1}
            ],
            "operation": "-"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .adjust(&items(), StockOperation::CheckOut)
        .await
        .unwrap();
}

#[tokio::test]
async fn check_in_posts_the_increment_operation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/stocks"))
        .and(body_json(serde_json::json!({
            "items": [
                {"item_id": 1, "quantity": 2},
                {"item_id": 5, "quantity": 1}
            ],
            "operation": "+"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .adjust(&items(), StockOperation::CheckIn)
        .await
        .unwrap();
}

#[tokio::test]
async fn stock_conflict_is_a_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/stocks"))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(serde_json::json!({"error": "not enough stock"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .adjust(&items(), StockOperation::CheckOut)
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Rejected { status: 409, .. }));
}

// ── Payment creation ─────────────────────────────────────────────────────

fn payment_request() -> PaymentRequest {
    PaymentRequest {
        user_id: UserId::new(1),
        order_id: OrderId::new(42),
        total_amount: 100.0,
    }
}

#[tokio::test]
async fn create_payment_posts_the_request_and_reads_the_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/payments"))
        .and(body_json(serde_json::json!({
            "user_id": 1,
            "order_id": 42,
            "total_amount": 100.0
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(serde_json::json!({"payment_id": 7})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let created = client_for(&server)
        .create_payment(&payment_request())
        .await
        .unwrap();
    assert_eq!(created.payment_id, 7);
}

#[tokio::test]
async fn create_payment_defaults_a_missing_id_to_zero() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/payments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .mount(&server)
        .await;

    let created = client_for(&server)
        .create_payment(&payment_request())
        .await
        .unwrap();
    assert_eq!(created.payment_id, 0);
}

#[tokio::test]
async fn create_payment_tolerates_a_non_json_success_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/payments"))
        .respond_with(ResponseTemplate::new(200).set_body_string("created"))
        .mount(&server)
        .await;

    let created = client_for(&server)
        .create_payment(&payment_request())
        .await
        .unwrap();
    assert_eq!(created.payment_id, 0);
}

#[tokio::test]
async fn create_payment_failure_is_a_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/payments"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(serde_json::json!({"error": "payment declined"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_payment(&payment_request())
        .await
        .unwrap_err();
    match err {
        GatewayError::Rejected { status, body, .. } => {
            assert_eq!(status, 500);
            assert!(body.contains("payment declined"));
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

// ── Unreachable services ─────────────────────────────────────────────────

#[tokio::test]
async fn a_closed_port_is_an_unreachable_outcome() {
    let mut config = GatewayConfig::new("http://127.0.0.1:1");
    config.timeout_secs = 1;
    config.max_retries = 0;
    let client = ApiGatewayClient::new(config).unwrap();

    let err = client.fetch_order(OrderId::new(42)).await.unwrap_err();
    assert!(matches!(err, GatewayError::Unreachable { .. }));
}
