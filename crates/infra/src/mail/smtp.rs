//! SMTP メール中継実装
//!
//! lettre の `AsyncSmtpTransport` を使用してメールを送信する。
//! 本番では認証付きの SMTP リレー（TLS）に、開発では Mailpit に接続する。

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport,
    AsyncTransport,
    Message,
    Tokio1Executor,
    message::header::ContentType,
    transport::smtp::authentication::Credentials,
};
use orderflow_domain::{
    mail::{MailReceipt, MailRequest},
    notification::NotificationError,
};

use super::MailRelay;

/// SMTP 認証情報（アカウント ID + シークレット）
#[derive(Clone)]
pub struct SmtpCredentials {
    pub username: String,
    pub password: String,
}

// パスワードはログに出さない
impl std::fmt::Debug for SmtpCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// SMTP メール中継
///
/// `lettre::AsyncSmtpTransport<Tokio1Executor>` をラップする。
pub struct SmtpMailRelay {
    transport:    AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpMailRelay {
    /// 認証付き SMTP リレーへの送信インスタンスを作成
    ///
    /// # 引数
    ///
    /// - `host`: SMTP リレーのホスト名
    /// - `port`: ポート番号（TLS 接続、例: 465）
    /// - `credentials`: リレーのアカウント ID とシークレット
    /// - `from_address`: 固定の送信元メールアドレス
    pub fn new(
        host: &str,
        port: u16,
        credentials: SmtpCredentials,
        from_address: String,
    ) -> Result<Self, NotificationError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(host)
            .map_err(|e| NotificationError::invalid_message(format!("SMTP リレー設定不正: {e}")))?
            .port(port)
            .credentials(Credentials::new(credentials.username, credentials.password))
            .build();

        Ok(Self {
            transport,
            from_address,
        })
    }

    /// TLS・認証なしで接続する送信インスタンスを作成（Mailpit 等のローカル SMTP 向け）
    pub fn unencrypted(host: &str, port: u16, from_address: String) -> Self {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
            .port(port)
            .build();

        Self {
            transport,
            from_address,
        }
    }

    /// リクエストから MIME メッセージを組み立てる
    ///
    /// 欠落したフィールドは設定しないだけで、補完はしない。
    /// 宛先が無い場合は lettre 側の組み立てエラーになる。
    fn build_message(&self, request: &MailRequest) -> Result<Message, NotificationError> {
        let mut builder = Message::builder().from(self.from_address.parse().map_err(|e| {
            NotificationError::invalid_message(format!("送信元アドレス不正: {e}"))
        })?);

        if let Some(to) = &request.to {
            builder = builder.to(to
                .parse()
                .map_err(|e| NotificationError::invalid_message(format!("{e}")))?);
        }

        if let Some(subject) = &request.subject {
            builder = builder.subject(subject);
        }

        builder
            .header(ContentType::TEXT_HTML)
            .body(request.html.clone().unwrap_or_default())
            .map_err(|e| NotificationError::invalid_message(format!("{e}")))
    }
}

#[async_trait]
impl MailRelay for SmtpMailRelay {
    async fn send_mail(&self, request: &MailRequest) -> Result<MailReceipt, NotificationError> {
        let message = self.build_message(request)?;

        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| NotificationError::send_failed(format!("{e}")))?;

        let text = response.message().collect::<Vec<_>>().join(" ");
        Ok(MailReceipt::new(format!("{} {text}", response.code())))
    }
}
