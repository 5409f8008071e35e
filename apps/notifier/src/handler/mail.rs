//! # メール中継ハンドラ
//!
//! ```text
//! POST /mail/send
//! ```
//!
//! ## レスポンス
//!
//! - 成功: `200 OK`、本文 `Email sent: {receipt}`
//! - 失敗: `500 Internal Server Error`、本文は中継バックエンドのエラー文言
//!
//! どちらも `text/plain`。CORS はルーター側で全オリジンを許可する。

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use orderflow_domain::mail::MailRequest;

use crate::{error::NotifierError, usecase::MailRelayService};

/// メール中継ハンドラの State
pub struct MailState {
    pub service: MailRelayService,
}

/// POST /mail/send
pub async fn send_mail(
    State(state): State<Arc<MailState>>,
    payload: Result<Json<MailRequest>, JsonRejection>,
) -> Result<String, NotifierError> {
    let Json(request) = payload.map_err(|e| NotifierError::BadRequest(e.body_text()))?;

    let receipt = state.service.relay(&request).await?;

    Ok(format!("Email sent: {receipt}"))
}
