//! # Notifier アプリケーション構築
//!
//! 送信バックエンドの初期化とルーター構築を担当する。
//! `main.rs` は設定読み込み・DB 接続・サーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use orderflow_domain::notification::NotificationError;
use orderflow_infra::{
    mail::{MailRelay, NoopMailRelay, SesMailRelay, SmtpCredentials, SmtpMailRelay},
    push::{FcmPushSender, NoopPushSender, PushSender},
};
use orderflow_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    config::{MailBackend, MailConfig, PushConfig},
    handler::{
        MailState,
        OrderEventState,
        handle_order_updated,
        health_check,
        send_mail,
    },
    usecase::{MailRelayService, OrderNotificationService},
};

/// ルーターを構築する
///
/// メール中継のルートだけブラウザから直接呼ばれるため、CORS を全許可する。
pub fn build_app(
    order_service: OrderNotificationService,
    mail_service: MailRelayService,
) -> Router {
    let order_event_state = Arc::new(OrderEventState {
        service: order_service,
    });
    let mail_state = Arc::new(MailState {
        service: mail_service,
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route("/events/order-updated", post(handle_order_updated))
                .with_state(order_event_state),
        )
        .merge(
            Router::new()
                .route("/mail/send", post(send_mail))
                .layer(cors)
                .with_state(mail_state),
        )
        // レイヤーは下から上に適用される:
        // 1. SetRequestIdLayer: X-Request-Id を UUID v7 で生成（既存ヘッダーは保持）
        // 2. TraceLayer: request_id を含むスパンを作成
        // 3. PropagateRequestIdLayer: レスポンスヘッダーに X-Request-Id をコピー
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}

/// 設定からプッシュ送信バックエンドを作成する
pub fn build_push_sender(config: &PushConfig) -> Arc<dyn PushSender> {
    match config {
        PushConfig::Fcm(fcm) => {
            tracing::info!(project_id = %fcm.project_id, "プッシュ送信: FCM");
            Arc::new(FcmPushSender::new(&fcm.project_id, fcm.access_token.clone()))
        }
        PushConfig::Noop => {
            tracing::info!("プッシュ送信: Noop");
            Arc::new(NoopPushSender)
        }
    }
}

/// 設定からメール中継バックエンドを作成する
///
/// SES は AWS の標準クレデンシャルチェーン（環境変数・プロファイル等）を使う。
pub async fn build_mail_relay(config: &MailConfig) -> Result<Arc<dyn MailRelay>, NotificationError> {
    let from_address = config.from_address.clone();

    let relay: Arc<dyn MailRelay> = match &config.backend {
        MailBackend::Smtp(smtp) => {
            tracing::info!(host = %smtp.host, port = smtp.port, "メール中継: SMTP");
            let credentials = SmtpCredentials {
                username: smtp.username.clone(),
                password: smtp.password.clone(),
            };
            Arc::new(SmtpMailRelay::new(
                &smtp.host,
                smtp.port,
                credentials,
                from_address,
            )?)
        }
        MailBackend::Mailpit { host, port } => {
            tracing::info!(%host, port, "メール中継: Mailpit");
            Arc::new(SmtpMailRelay::unencrypted(host, *port, from_address))
        }
        MailBackend::Ses => {
            tracing::info!("メール中継: SES");
            let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
            let client = aws_sdk_sesv2::Client::new(&aws_config);
            Arc::new(SesMailRelay::new(client, from_address))
        }
        MailBackend::Noop => {
            tracing::info!("メール中継: Noop");
            Arc::new(NoopMailRelay)
        }
    };

    Ok(relay)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn noop設定ではエラーなく中継バックエンドを作成できる() {
        let config = MailConfig {
            from_address: "noreply@orderflow.example.com".to_string(),
            backend:      MailBackend::Noop,
        };

        assert!(build_mail_relay(&config).await.is_ok());
    }

    #[tokio::test]
    async fn mailpit設定では接続せずに中継バックエンドを作成できる() {
        let config = MailConfig {
            from_address: "noreply@orderflow.example.com".to_string(),
            backend:      MailBackend::Mailpit {
                host: "localhost".to_string(),
                port: 1025,
            },
        };

        assert!(build_mail_relay(&config).await.is_ok());
    }
}
