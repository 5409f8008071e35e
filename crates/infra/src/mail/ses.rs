//! SES メール中継実装
//!
//! AWS SES v2 API を使用してメールを送信する。
//! 追跡用文字列には SES のメッセージ ID を使う。

use async_trait::async_trait;
use aws_sdk_sesv2::{
    Client,
    types::{Body, Content, Destination, EmailContent, Message},
};
use orderflow_domain::{
    mail::{MailReceipt, MailRequest},
    notification::NotificationError,
};

use super::MailRelay;

/// SES メール中継
///
/// `aws_sdk_sesv2::Client` をラップする。
pub struct SesMailRelay {
    client:       Client,
    from_address: String,
}

impl SesMailRelay {
    /// 新しい SES 送信インスタンスを作成
    ///
    /// # 引数
    ///
    /// - `client`: AWS SES v2 クライアント
    /// - `from_address`: 送信元メールアドレス（SES で検証済みであること）
    pub fn new(client: Client, from_address: String) -> Self {
        Self {
            client,
            from_address,
        }
    }
}

/// 任意のテキストから SES の `Content` を作る
fn content(data: &str) -> Result<Content, NotificationError> {
    Content::builder()
        .data(data)
        .build()
        .map_err(|e| NotificationError::invalid_message(format!("{e}")))
}

#[async_trait]
impl MailRelay for SesMailRelay {
    async fn send_mail(&self, request: &MailRequest) -> Result<MailReceipt, NotificationError> {
        // 欠落したフィールドはそのまま未設定で渡し、SES の拒否に任せる
        let destination = Destination::builder()
            .set_to_addresses(request.to.clone().map(|to| vec![to]))
            .build();

        let subject = request.subject.as_deref().map(content).transpose()?;
        let html = request.html.as_deref().map(content).transpose()?;

        let email_content = EmailContent::builder()
            .simple(
                Message::builder()
                    .set_subject(subject)
                    .body(Body::builder().set_html(html).build())
                    .build(),
            )
            .build();

        let output = self
            .client
            .send_email()
            .from_email_address(&self.from_address)
            .destination(destination)
            .content(email_content)
            .send()
            .await
            .map_err(|e| NotificationError::send_failed(format!("{e}")))?;

        Ok(MailReceipt::new(output.message_id().unwrap_or_default()))
    }
}
