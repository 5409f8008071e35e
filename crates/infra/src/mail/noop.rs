//! Noop メール中継実装
//!
//! メールを実際に送信せず、ログ出力のみ行う。

use async_trait::async_trait;
use orderflow_domain::{
    mail::{MailReceipt, MailRequest},
    notification::NotificationError,
};

use super::MailRelay;

/// Noop 送信時に返す追跡用文字列
const NOOP_RECEIPT: &str = "noop";

/// Noop メール中継（ログ出力のみ）
#[derive(Debug, Clone)]
pub struct NoopMailRelay;

#[async_trait]
impl MailRelay for NoopMailRelay {
    async fn send_mail(&self, request: &MailRequest) -> Result<MailReceipt, NotificationError> {
        tracing::info!(
            to = ?request.to,
            subject = ?request.subject,
            "Noop: メール送信をスキップ"
        );
        Ok(MailReceipt::new(NOOP_RECEIPT))
    }
}
