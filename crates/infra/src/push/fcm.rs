//! FCM プッシュ送信実装
//!
//! Firebase Cloud Messaging HTTP v1 API を使用して、1 台のデバイスへ送信する。
//!
//! ```text
//! POST https://fcm.googleapis.com/v1/projects/{project_id}/messages:send
//! Authorization: Bearer {access_token}
//!
//! { "message": { "token": "...", "notification": { "title": "...", "body": "..." } } }
//! ```
//!
//! アクセストークンの発行・更新は外部に任せ、起動時の設定として受け取る。
//! タイムアウトは設定しない（HTTP クライアントと実行基盤に委ねる）。

use async_trait::async_trait;
use orderflow_domain::{
    notification::{NotificationError, NotificationPayload},
    owner::Destination,
};
use serde::{Deserialize, Serialize};

use super::PushSender;

/// FCM API のベース URL
const FCM_BASE_URL: &str = "https://fcm.googleapis.com";

/// FCM 送信リクエスト
#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    message: Message<'a>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    token:        &'a str,
    notification: &'a NotificationPayload,
}

/// FCM 送信レスポンス
///
/// `name` は `projects/{project_id}/messages/{message_id}` 形式。
#[derive(Debug, Deserialize)]
struct SendResponse {
    name: String,
}

/// FCM プッシュ送信
pub struct FcmPushSender {
    client:       reqwest::Client,
    endpoint:     String,
    access_token: String,
}

impl FcmPushSender {
    /// 新しい FCM 送信インスタンスを作成
    ///
    /// # 引数
    ///
    /// - `project_id`: Firebase プロジェクト ID
    /// - `access_token`: `firebase.messaging` スコープの OAuth2 アクセストークン
    pub fn new(project_id: &str, access_token: String) -> Self {
        Self::with_base_url(FCM_BASE_URL, project_id, access_token)
    }

    /// ベース URL を指定して作成する（エミュレータ・テスト用）
    pub fn with_base_url(base_url: &str, project_id: &str, access_token: String) -> Self {
        let endpoint = format!(
            "{}/v1/projects/{project_id}/messages:send",
            base_url.trim_end_matches('/')
        );

        Self {
            client: reqwest::Client::new(),
            endpoint,
            access_token,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PushSender for FcmPushSender {
    async fn send(
        &self,
        destination: &Destination,
        payload: &NotificationPayload,
    ) -> Result<String, NotificationError> {
        let request = SendRequest {
            message: Message {
                token:        destination.as_str(),
                notification: payload,
            },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.access_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| NotificationError::send_failed(format!("FCM 送信失敗: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotificationError::send_failed(format!(
                "FCM 送信失敗 ({status}): {body}"
            )));
        }

        let body: SendResponse = response
            .json()
            .await
            .map_err(|e| NotificationError::send_failed(format!("FCM 応答の解析失敗: {e}")))?;

        Ok(body.name)
    }
}
