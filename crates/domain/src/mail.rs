//! # メール中継
//!
//! 呼び出し元から受け取ったメールを、トランザクションメールの中継サービスへ
//! そのまま渡すためのモデル。
//!
//! 事前バリデーションは行わない。`to` / `subject` / `html` の欠落は
//! 中継サービス（またはメッセージ組み立て）側の拒否として失敗経路に乗る。
//! 送信元アドレスだけは中継側の固定値を使う。

use serde::{Deserialize, Serialize};

/// メール中継リクエスト
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MailRequest {
    /// 宛先メールアドレス
    pub to:      Option<String>,
    /// 件名
    pub subject: Option<String>,
    /// HTML 本文
    pub html:    Option<String>,
}

impl MailRequest {
    /// 宛先アドレスのドメイン部分
    ///
    /// ログには宛先全体ではなくこれだけを出す。`@` を含まない宛先は `None`。
    pub fn recipient_domain(&self) -> Option<&str> {
        self.to
            .as_deref()
            .and_then(|to| to.rsplit_once('@'))
            .map(|(_, domain)| domain)
    }
}

/// メール中継の受領結果
///
/// 中継サービスが返す追跡用の文字列（SMTP 応答、メッセージ ID など）。
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{_0}")]
pub struct MailReceipt(String);

impl MailReceipt {
    pub fn new(tracking: impl Into<String>) -> Self {
        Self(tracking.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn 欠落したフィールドはnoneとして受け取る() {
        let request: MailRequest = serde_json::from_value(json!({"subject": "S"})).unwrap();

        assert_eq!(
            request,
            MailRequest {
                to:      None,
                subject: Some("S".to_string()),
                html:    None,
            }
        );
    }

    #[test]
    fn 宛先のドメイン部分だけを取り出す() {
        let request = MailRequest {
            to: Some("alice@shop.example.com".to_string()),
            ..Default::default()
        };

        assert_eq!(request.recipient_domain(), Some("shop.example.com"));
        assert_eq!(MailRequest::default().recipient_domain(), None);
        assert_eq!(
            MailRequest {
                to: Some("not-an-address".to_string()),
                ..Default::default()
            }
            .recipient_domain(),
            None
        );
    }
}
