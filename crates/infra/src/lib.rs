//! # OrderFlow インフラ層
//!
//! 外部システムとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **データベース接続**: PostgreSQL への接続プール管理
//! - **プロフィール参照**: オーナーの通知トークンの読み取り
//! - **プッシュ送信**: FCM への単一デバイス送信
//! - **メール中継**: SMTP リレー / SES への送信
//!
//! ## 依存関係
//!
//! ```text
//! notifier → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL データベース接続管理
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリ実装
//! - [`push`] - プッシュ通知送信
//! - [`mail`] - メール中継

pub mod db;
pub mod error;
pub mod mail;
#[cfg(feature = "test-utils")]
pub mod mock;
pub mod push;
pub mod repository;

pub use error::{InfraError, InfraErrorKind};
