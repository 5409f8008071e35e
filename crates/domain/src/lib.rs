//! # OrderFlow ドメイン層
//!
//! 注文ステータス変更通知とメール中継のドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **純粋なルールのみ**: ステータス遷移の検出、通知先の読み取りなど、
//!   外部システムに依存しない判断だけを置く
//! - **一時的な値**: ここで定義する型はどれも 1 回の呼び出しの間だけ存在し、
//!   永続化しない
//!
//! ## 依存関係の方向
//!
//! ```text
//! notifier → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`order`] - 注文スナップショットとステータス遷移
//! - [`owner`] - オーナー、通知先、受信者解決の結果
//! - [`notification`] - 通知ペイロードと配送結果
//! - [`mail`] - メール中継リクエスト
//!
//! ## 使用例
//!
//! ```rust
//! use orderflow_domain::{
//!     order::{OrderId, OrderPath, OrderTransition, RecordSnapshot},
//!     owner::OwnerId,
//! };
//! use serde_json::json;
//!
//! let path = OrderPath {
//!     owner_id: OwnerId::new("u1"),
//!     order_id: OrderId::new("42"),
//! };
//! let before = RecordSnapshot::new(json!({"status": "pending"}));
//! let after = RecordSnapshot::new(json!({"status": "shipped"}));
//!
//! let transition = OrderTransition::detect(&path, &before, &after).unwrap();
//! assert_eq!(transition.new_status_label(), "shipped");
//! ```

#[macro_use]
mod macros;

pub mod mail;
pub mod notification;
pub mod order;
pub mod owner;
