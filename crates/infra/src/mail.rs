//! # メール中継
//!
//! 呼び出し元から受け取ったメールを中継サービスへ送るインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `MailRelay` trait でメール送信を抽象化
//! - **3 つの実装**: SMTP リレー（認証付き）、SES（本番用）、Noop（テスト用）
//! - **環境変数切替**: `MAIL_BACKEND` でランタイム選択
//! - **素通し**: 宛先・件名・本文の欠落を事前に検査しない。
//!   組み立てや送信での拒否がそのまま失敗になる

mod noop;
mod ses;
mod smtp;

use async_trait::async_trait;
pub use noop::NoopMailRelay;
use orderflow_domain::{
    mail::{MailReceipt, MailRequest},
    notification::NotificationError,
};
pub use ses::SesMailRelay;
pub use smtp::{SmtpCredentials, SmtpMailRelay};

/// メール中継トレイト
///
/// 送信元アドレスは実装側が保持する固定値を使う。
#[async_trait]
pub trait MailRelay: Send + Sync {
    /// メールを送信し、中継サービスの追跡用文字列を返す
    async fn send_mail(&self, request: &MailRequest) -> Result<MailReceipt, NotificationError>;
}
