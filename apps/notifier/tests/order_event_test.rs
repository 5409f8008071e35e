//! # 注文更新イベントエンドポイントのテスト
//!
//! ルーター全体（Request ID レイヤー込み）に対してリクエストを送り、
//! 通知パイプラインの結果に関わらず 204 が返ることを検証する。

use std::sync::Arc;

use axum::{Router, body::Body};
use http::{Request, StatusCode};
use orderflow_infra::mock::{MockMailRelay, MockOwnerProfileRepository, MockPushSender};
use orderflow_notifier::{
    app_builder::build_app,
    usecase::{MailRelayService, OrderNotificationService, OrderStatusTemplate},
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tower::ServiceExt;

fn test_app(repository: MockOwnerProfileRepository, sender: MockPushSender) -> Router {
    let order_service = OrderNotificationService::new(
        Arc::new(repository),
        Arc::new(sender),
        Arc::new(OrderStatusTemplate),
    );
    let mail_service = MailRelayService::new(Arc::new(MockMailRelay::accepting()));
    build_app(order_service, mail_service)
}

fn order_updated(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/events/order-updated")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn shipped() -> Value {
    json!({
        "params": {"userId": "user-1", "orderId": "42"},
        "before": {"status": "pending"},
        "after": {"status": "shipped"}
    })
}

#[tokio::test]
async fn test_ステータス変化時に204を返し通知を1件送る() {
    let repository = MockOwnerProfileRepository::new();
    repository.add_owner_with_token("user-1", "T1");
    let sender = MockPushSender::new();
    let app = test_app(repository, sender.clone());

    let response = app.oneshot(order_updated(&shipped())).await.unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let sent = sender.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].destination.as_str(), "T1");
    assert_eq!(sent[0].payload.body, "Your order #42 is now shipped");
}

#[tokio::test]
async fn test_ステータスが変わらない更新でも204を返す() {
    let repository = MockOwnerProfileRepository::new();
    repository.add_owner_with_token("user-1", "T1");
    let sender = MockPushSender::new();
    let app = test_app(repository, sender.clone());

    let body = json!({
        "params": {"userId": "user-1", "orderId": "42"},
        "before": {"status": "pending", "note": "a"},
        "after": {"status": "pending", "note": "b"}
    });
    let response = app.oneshot(order_updated(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(sender.sent().is_empty());
}

#[tokio::test]
async fn test_送信失敗でも204を返す() {
    let repository = MockOwnerProfileRepository::new();
    repository.add_owner_with_token("user-1", "T1");
    let app = test_app(repository, MockPushSender::failing("UNAVAILABLE"));

    let response = app.oneshot(order_updated(&shipped())).await.unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_プロフィールストア障害でも204を返す() {
    let repository = MockOwnerProfileRepository::new();
    repository.set_unreachable();
    let sender = MockPushSender::new();
    let app = test_app(repository, sender.clone());

    let response = app.oneshot(order_updated(&shipped())).await.unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(sender.sent().is_empty());
}

#[tokio::test]
async fn test_パスパラメータが無いボディは400を返す() {
    let app = test_app(MockOwnerProfileRepository::new(), MockPushSender::new());

    let response = app
        .oneshot(order_updated(&json!({"before": {}, "after": {}})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_レスポンスにx_request_idヘッダーが含まれる() {
    let app = test_app(MockOwnerProfileRepository::new(), MockPushSender::new());

    let response = app.oneshot(order_updated(&shipped())).await.unwrap();

    assert!(
        response.headers().contains_key("x-request-id"),
        "レスポンスに x-request-id ヘッダーが含まれること"
    );
}

#[tokio::test]
async fn test_ヘルスチェックがバージョンを返す() {
    let app = test_app(MockOwnerProfileRepository::new(), MockPushSender::new());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}
