//! # 通知
//!
//! プッシュ通知とメール中継に共通するドメインモデルを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`NotificationPayload`] | 通知ペイロード | プッシュ通知のタイトルと本文 |
//! | [`DeliveryOutcome`] | 配送結果 | 送信成功（プロバイダ応答）または失敗（エラー詳細） |
//! | [`NotificationError`] | 通知送信エラー | 送信バックエンドが返すエラー |
//!
//! ## 設計方針
//!
//! - **fire-and-forget**: プッシュ通知の失敗はトリガー元に伝播させない
//! - **1 回だけ試行**: リトライしない。配送結果はログにのみ残す

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;
use thiserror::Error;

/// 通知送信エラー
///
/// `Display` は送信バックエンドのエラー文言をそのまま出力する。
/// メール中継の失敗時はこの文言が HTTP レスポンス本文になる。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotificationError {
    /// 送信バックエンドが拒否した、または到達できなかった
    #[error("{0}")]
    SendFailed(String),

    /// 送信前のメッセージ組み立てに失敗
    #[error("{0}")]
    InvalidMessage(String),
}

impl NotificationError {
    pub fn send_failed(detail: impl Into<String>) -> Self {
        Self::SendFailed(detail.into())
    }

    pub fn invalid_message(detail: impl Into<String>) -> Self {
        Self::InvalidMessage(detail.into())
    }
}

/// プッシュ通知ペイロード
///
/// ステータス遷移ごとに新しく組み立てる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub title: String,
    pub body:  String,
}

/// 配送結果
#[derive(Debug, Clone, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum DeliveryOutcome {
    /// 送信成功（プロバイダの応答文字列）
    Sent(String),
    /// 送信失敗（エラー詳細）
    Failed(String),
}

impl DeliveryOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent(_))
    }
}

impl From<Result<String, NotificationError>> for DeliveryOutcome {
    fn from(result: Result<String, NotificationError>) -> Self {
        match result {
            Ok(response) => Self::Sent(response),
            Err(e) => Self::Failed(e.to_string()),
        }
    }
}
