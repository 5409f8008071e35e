//! # プッシュ通知送信
//!
//! 注文オーナーのデバイスへプッシュ通知を送るインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `PushSender` trait でプッシュ送信を抽象化
//! - **2 つの実装**: FCM HTTP v1（本番用）、Noop（開発・テスト用）
//! - **環境変数切替**: `PUSH_BACKEND` でランタイム選択
//! - **1 回だけ**: リトライは実装側でも行わない

mod fcm;
mod noop;

use async_trait::async_trait;
pub use fcm::FcmPushSender;
pub use noop::NoopPushSender;
use orderflow_domain::{
    notification::{NotificationError, NotificationPayload},
    owner::Destination,
};

/// プッシュ送信トレイト
///
/// 1 回の呼び出しで 1 つの通知先にだけ送る。
#[async_trait]
pub trait PushSender: Send + Sync {
    /// プッシュ通知を送信し、プロバイダの応答文字列を返す
    async fn send(
        &self,
        destination: &Destination,
        payload: &NotificationPayload,
    ) -> Result<String, NotificationError>;
}
