//! # 注文
//!
//! 注文レコードのスナップショットと、ステータス遷移の検出ルールを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`RecordSnapshot`] | レコードスナップショット | 更新前後いずれかの注文ドキュメント全体 |
//! | [`OrderPath`] | ドキュメントパス | トリガー元が渡すオーナー ID と注文 ID |
//! | [`OrderTransition`] | ステータス遷移 | `status` が変化したことを表す一時的な値 |
//!
//! ## 設計方針
//!
//! - **ID はパスから取る**: オーナー ID・注文 ID はスナップショット本体ではなく
//!   トリガーのパスパラメータから取得する
//! - **比較は JSON 値で行う**: `status` の型を仮定せず、JSON 値として等価判定する
//! - **欠損は落とさない**: `status` が無いドキュメントでもパニックしない。
//!   双方とも欠損なら「変化なし」、片方のみ欠損なら「変化あり」

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::owner::OwnerId;

define_string_id! {
    /// 注文 ID
    ///
    /// `users/{userId}/orders/{orderId}` の `orderId` 部分。
    pub struct OrderId;
}

/// ステータス欠損時に通知本文へ埋め込む表記
const MISSING_STATUS_LABEL: &str = "unknown";

/// 注文ドキュメントのパス情報
///
/// トリガー元のパスパラメータ（`userId`, `orderId`）に対応する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPath {
    #[serde(rename = "userId")]
    pub owner_id: OwnerId,
    #[serde(rename = "orderId")]
    pub order_id: OrderId,
}

/// 注文レコードのスナップショット
///
/// 更新前（before-image）または更新後（after-image）のドキュメント全体を保持する。
/// `status` 以外のフィールドは参照しない。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordSnapshot(Value);

impl RecordSnapshot {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// `status` フィールドの生の値を返す
    ///
    /// ドキュメントがオブジェクトでない場合やフィールドが無い場合は `None`。
    pub fn status(&self) -> Option<&Value> {
        self.0.get("status")
    }
}

/// 注文ドキュメントの更新イベント
///
/// ストレージの更新トリガーが 1 回の更新ごとに渡す内容。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderChangeEvent {
    pub params: OrderPath,
    #[serde(default)]
    pub before: RecordSnapshot,
    #[serde(default)]
    pub after:  RecordSnapshot,
}

impl OrderChangeEvent {
    /// この更新でステータス遷移が起きたかを判定する
    pub fn transition(&self) -> Option<OrderTransition> {
        OrderTransition::detect(&self.params, &self.before, &self.after)
    }
}

/// 注文ステータス（表示用に文字列化した値）
///
/// 文字列はそのまま、それ以外の JSON 値は JSON 表記で保持する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(transparent)]
#[display("{_0}")]
pub struct OrderStatus(String);

impl OrderStatus {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) => Self(s.clone()),
            other => Self(other.to_string()),
        }
    }
}

/// ステータス遷移
///
/// 1 回の通知試行の間だけ存在する。永続化しない。
///
/// 不変条件: 更新前後の `status` は JSON 値として異なる。
/// この値は [`OrderTransition::detect`] からのみ生成される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderTransition {
    owner_id:        OwnerId,
    order_id:        OrderId,
    previous_status: Option<OrderStatus>,
    new_status:      Option<OrderStatus>,
}

impl OrderTransition {
    /// 更新前後のスナップショットからステータス遷移を検出する
    ///
    /// `status` が等しい（双方欠損を含む）場合は `None` を返す。
    /// ステータスを変えない書き込みで通知が飛ばないためのガード。
    pub fn detect(
        path: &OrderPath,
        before: &RecordSnapshot,
        after: &RecordSnapshot,
    ) -> Option<Self> {
        let previous = before.status();
        let current = after.status();

        if previous == current {
            return None;
        }

        Some(Self {
            owner_id:        path.owner_id.clone(),
            order_id:        path.order_id.clone(),
            previous_status: previous.map(OrderStatus::from_value),
            new_status:      current.map(OrderStatus::from_value),
        })
    }

    pub fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }

    pub fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    pub fn previous_status(&self) -> Option<&OrderStatus> {
        self.previous_status.as_ref()
    }

    pub fn new_status(&self) -> Option<&OrderStatus> {
        self.new_status.as_ref()
    }

    /// 通知本文に埋め込む新ステータスの表記
    pub fn new_status_label(&self) -> &str {
        self.new_status
            .as_ref()
            .map_or(MISSING_STATUS_LABEL, OrderStatus::as_str)
    }
}
