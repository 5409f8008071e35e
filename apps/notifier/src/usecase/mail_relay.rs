//! # メール中継ユースケース
//!
//! 受け取ったメールを設定済みの中継バックエンドへそのまま渡す。
//! 結果は呼び出し元へ返し、同時にビジネスイベントとしてログに残す。

use std::sync::Arc;

use orderflow_domain::{
    mail::{MailReceipt, MailRequest},
    notification::NotificationError,
};
use orderflow_infra::mail::MailRelay;
use orderflow_shared::{
    event_log::{error, event},
    log_business_event,
};

/// メール中継サービス
pub struct MailRelayService {
    relay: Arc<dyn MailRelay>,
}

impl MailRelayService {
    pub fn new(relay: Arc<dyn MailRelay>) -> Self {
        Self { relay }
    }

    /// メールを 1 回だけ中継する
    ///
    /// 入力の検証は行わず、欠落フィールドの扱いは中継バックエンドに任せる。
    #[tracing::instrument(skip_all)]
    pub async fn relay(&self, request: &MailRequest) -> Result<MailReceipt, NotificationError> {
        // 宛先アドレス全体はログに出さない
        let recipient_domain = request.recipient_domain().unwrap_or("-");

        match self.relay.send_mail(request).await {
            Ok(receipt) => {
                log_business_event!(
                    event.category = event::category::MAIL,
                    event.action = event::action::MAIL_SENT,
                    event.entity_type = event::entity_type::MAIL,
                    mail.recipient_domain = recipient_domain,
                    event.result = event::result::SUCCESS,
                    mail.receipt = %receipt,
                    "メール中継成功"
                );
                Ok(receipt)
            }
            Err(e) => {
                log_business_event!(
                    event.category = event::category::MAIL,
                    event.action = event::action::MAIL_FAILED,
                    event.entity_type = event::entity_type::MAIL,
                    mail.recipient_domain = recipient_domain,
                    event.result = event::result::FAILURE,
                    error.category = error::category::EXTERNAL_SERVICE,
                    error.kind = error::kind::MAIL_DELIVERY,
                    error = %e,
                    "メール中継失敗"
                );
                Err(e)
            }
        }
    }
}
