//! # Notifier サーバー
//!
//! ## 役割
//!
//! - **注文ステータス変更通知**: ストレージの更新トリガーから注文ドキュメントの
//!   更新を受け取り、ステータスが変わっていればオーナーへプッシュ通知を送る
//! - **メール中継**: ブラウザから受け取ったメールを SMTP リレー / SES へ渡す
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │   Trigger    │────▶│   Notifier   │────▶│  FCM / SMTP  │
//! │  (storage)   │     │              │     │     / SES    │
//! └──────────────┘     └──────────────┘     └──────────────┘
//!                             │
//!                             ▼
//!                      ┌──────────────┐
//!                      │  PostgreSQL  │
//!                      │  (profiles)  │
//!                      └──────────────┘
//! ```
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `NOTIFIER_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `NOTIFIER_PORT` | **Yes** | ポート番号 |
//! | `DATABASE_URL` | **Yes** | プロフィールストアの接続 URL |
//! | `PUSH_BACKEND` | No | `fcm` / `noop`（デフォルト: `noop`） |
//! | `MAIL_BACKEND` | No | `smtp` / `mailpit` / `ses` / `noop`（デフォルト: `noop`） |
//!
//! バックエンドごとの追加変数は `config` モジュールを参照。
//!
//! ## 起動方法
//!
//! ```bash
//! cargo run -p orderflow-notifier
//! ```

use std::{net::SocketAddr, sync::Arc};

use orderflow_infra::{db, repository::PostgresOwnerProfileRepository};
use orderflow_notifier::{
    app_builder::{build_app, build_mail_relay, build_push_sender},
    config::NotifierConfig,
    usecase::{MailRelayService, OrderNotificationService, OrderStatusTemplate},
};
use orderflow_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    init_tracing(TracingConfig::from_env("notifier"));
    let _tracing_guard = tracing::info_span!("app", service = "notifier").entered();

    let config = NotifierConfig::from_env()?;

    tracing::info!(
        "Notifier サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    let pool = db::create_pool(&config.database_url).await?;
    tracing::info!("データベースに接続しました");

    let order_service = OrderNotificationService::new(
        Arc::new(PostgresOwnerProfileRepository::new(pool)),
        build_push_sender(&config.push),
        Arc::new(OrderStatusTemplate),
    );
    let mail_service = MailRelayService::new(build_mail_relay(&config.mail).await?);

    let app = build_app(order_service, mail_service);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Notifier サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
