//! # Notifier エラー定義
//!
//! HTTP 層で発生するエラーと、レスポンスへの変換を定義する。
//!
//! 注文イベントの処理パイプライン内の失敗はここに来ない（ログのみ）。
//! ここに来るのはリクエストボディの解析失敗とメール中継の失敗だけ。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use orderflow_domain::notification::NotificationError;
use orderflow_shared::ErrorResponse;
use thiserror::Error;

/// Notifier で発生するエラー
#[derive(Debug, Error)]
pub enum NotifierError {
    /// 不正なリクエスト
    #[error("不正なリクエスト: {0}")]
    BadRequest(String),

    /// メール中継の失敗
    ///
    /// レスポンス本文は中継バックエンドのエラー文言そのまま（`text/plain`）。
    #[error("{0}")]
    MailDelivery(#[from] NotificationError),
}

impl IntoResponse for NotifierError {
    fn into_response(self) -> Response {
        match self {
            NotifierError::BadRequest(detail) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(detail)),
            )
                .into_response(),
            NotifierError::MailDelivery(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn bad_requestはproblem_details形式の400になる() {
        let response = NotifierError::BadRequest("JSON が不正です".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], 400);
        assert_eq!(json["detail"], "JSON が不正です");
    }

    #[tokio::test]
    async fn メール中継失敗はエラー文言そのままの500になる() {
        let response =
            NotifierError::from(NotificationError::send_failed("535 auth failed")).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"535 auth failed");
    }
}
