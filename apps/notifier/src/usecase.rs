//! # ユースケース層
//!
//! ハンドラから呼ばれるアプリケーションロジック。
//! リポジトリ・送信バックエンドはトレイトオブジェクトで受け取る。

pub mod mail_relay;
pub mod order_notification;

pub use mail_relay::MailRelayService;
pub use order_notification::{
    NotificationTemplate,
    OrderEventOutcome,
    OrderNotificationService,
    OrderStatusTemplate,
};
