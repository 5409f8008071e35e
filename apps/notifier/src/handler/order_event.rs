//! # 注文更新イベントハンドラ
//!
//! ストレージの更新トリガーから注文ドキュメントの更新を受け取る。
//!
//! ```text
//! POST /events/order-updated
//! ```
//!
//! ボディを解析できた時点で必ず `204 No Content` を返す。通知パイプラインの
//! 結果（スキップ・配送失敗など）はレスポンスに反映しない。

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use orderflow_domain::order::OrderChangeEvent;

use crate::{error::NotifierError, usecase::OrderNotificationService};

/// 注文更新イベントハンドラの State
pub struct OrderEventState {
    pub service: OrderNotificationService,
}

/// POST /events/order-updated
pub async fn handle_order_updated(
    State(state): State<Arc<OrderEventState>>,
    payload: Result<Json<OrderChangeEvent>, JsonRejection>,
) -> Result<StatusCode, NotifierError> {
    let Json(change) = payload.map_err(|e| NotifierError::BadRequest(e.body_text()))?;

    let outcome = state.service.handle(&change).await;
    tracing::debug!(?outcome, "注文更新イベントを処理");

    Ok(StatusCode::NO_CONTENT)
}
