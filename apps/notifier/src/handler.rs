//! # HTTP ハンドラ
//!
//! - `health`: ヘルスチェック
//! - `order_event`: 注文ドキュメント更新トリガーの受け口
//! - `mail`: メール中継

pub mod health;
pub mod mail;
pub mod order_event;

pub use health::health_check;
pub use mail::{MailState, send_mail};
pub use order_event::{OrderEventState, handle_order_updated};
