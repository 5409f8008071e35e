//! # 注文ステータス変更通知
//!
//! 注文ドキュメントの更新ごとに、ステータスが変わっていればオーナーの
//! デバイスへプッシュ通知を 1 回送る。

mod service;
mod template;

pub use service::{OrderEventOutcome, OrderNotificationService};
pub use template::{NotificationTemplate, OrderStatusTemplate};
