//! Noop プッシュ送信実装
//!
//! 通知を実際に送信せず、ログ出力のみ行う。
//! 開発環境やプッシュ無効化時に使用する。

use async_trait::async_trait;
use orderflow_domain::{
    notification::{NotificationError, NotificationPayload},
    owner::Destination,
};

use super::PushSender;

/// Noop 送信時にプロバイダ応答として返す文字列
const NOOP_RESPONSE: &str = "noop";

/// Noop プッシュ送信（ログ出力のみ）
#[derive(Debug, Clone)]
pub struct NoopPushSender;

#[async_trait]
impl PushSender for NoopPushSender {
    async fn send(
        &self,
        destination: &Destination,
        payload: &NotificationPayload,
    ) -> Result<String, NotificationError> {
        tracing::info!(
            destination = ?destination,
            title = %payload.title,
            body = %payload.body,
            "Noop: プッシュ送信をスキップ"
        );
        Ok(NOOP_RESPONSE.to_string())
    }
}
