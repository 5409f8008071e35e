//! # メール中継エンドポイントのテスト
//!
//! - 成功時は `200` と `Email sent: {receipt}`
//! - 失敗時は `500` と中継バックエンドのエラー文言
//! - 任意オリジンからのプリフライトが通る

use std::sync::Arc;

use axum::{Router, body::Body, response::Response};
use http::{Request, StatusCode};
use orderflow_domain::mail::MailRequest;
use orderflow_infra::mock::{MockMailRelay, MockOwnerProfileRepository, MockPushSender};
use orderflow_notifier::{
    app_builder::build_app,
    usecase::{MailRelayService, OrderNotificationService, OrderStatusTemplate},
};
use pretty_assertions::assert_eq;
use serde_json::json;
use tower::ServiceExt;

fn test_app(relay: MockMailRelay) -> Router {
    let order_service = OrderNotificationService::new(
        Arc::new(MockOwnerProfileRepository::new()),
        Arc::new(MockPushSender::new()),
        Arc::new(OrderStatusTemplate),
    );
    build_app(order_service, MailRelayService::new(Arc::new(relay)))
}

fn send_mail(body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/mail/send")
        .header("content-type", "application/json")
        .header("origin", "https://shop.example.com")
        .body(Body::from(body))
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_中継成功時に200と受領結果を返す() {
    let relay = MockMailRelay::accepting();
    let app = test_app(relay.clone());
    let body = json!({"to": "a@example.com", "subject": "Hi", "html": "<p>x</p>"});

    let response = app.oneshot(send_mail(body.to_string())).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_text(response).await,
        "Email sent: 250 2.0.0 OK queued as mock-1"
    );
    assert_eq!(
        relay.sent(),
        vec![MailRequest {
            to:      Some("a@example.com".to_string()),
            subject: Some("Hi".to_string()),
            html:    Some("<p>x</p>".to_string()),
        }]
    );
}

#[tokio::test]
async fn test_中継失敗時に500とエラー文言をそのまま返す() {
    let app = test_app(MockMailRelay::rejecting("boom"));
    let body = json!({"to": "a@example.com", "subject": "Hi", "html": "<p>x</p>"});

    let response = app.oneshot(send_mail(body.to_string())).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(response).await, "boom");
}

#[tokio::test]
async fn test_フィールドが欠けていても検証せず中継する() {
    let relay = MockMailRelay::accepting();
    let app = test_app(relay.clone());

    let response = app.oneshot(send_mail("{}".to_string())).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(relay.sent(), vec![MailRequest::default()]);
}

#[tokio::test]
async fn test_任意オリジンからのプリフライトが通る() {
    let app = test_app(MockMailRelay::accepting());

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/mail/send")
                .header("origin", "https://anywhere.example.net")
                .header("access-control-request-method", "POST")
                .header("access-control-request-headers", "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap()
            .to_str()
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_実リクエストにもcorsヘッダーが付く() {
    let app = test_app(MockMailRelay::accepting());

    let response = app
        .oneshot(send_mail(json!({"to": "a@example.com"}).to_string()))
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap()
            .to_str()
            .unwrap(),
        "*"
    );
}
