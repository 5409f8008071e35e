//! # 注文通知サービス
//!
//! ステータス遷移の検出 → 受信者解決 → プッシュ配送を 1 本のパイプラインで行う。
//!
//! ## 設計方針
//!
//! - **fire-and-forget**: `handle()` は `Result` を返さない。トリガー元は
//!   自然なリトライ枠を持たず、再送されると非冪等な送信が重複するため
//! - **1 回だけ試行**: 配送はリトライしない
//! - **ログで区別**: 「トークン未登録」と「プロフィールストア障害」は
//!   どちらも配送をスキップするが、ログ上は別のイベントとして出す
//! - **重複排除なし**: 同じ更新イベントが 2 回届けば 2 回送る。
//!   `(owner_id, order_id, new_status)` をキーにした冪等化は外部ストアが必要

use std::sync::Arc;

use orderflow_domain::{
    notification::DeliveryOutcome,
    order::{OrderChangeEvent, OrderTransition},
    owner::{Destination, OwnerId, Resolution},
};
use orderflow_infra::{InfraError, push::PushSender, repository::OwnerProfileRepository};
use orderflow_shared::{
    event_log::{error, event},
    log_business_event,
};

use super::NotificationTemplate;

/// 1 回の更新イベントを処理した結果
///
/// ログとテストのための値で、HTTP 層は参照しない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderEventOutcome {
    /// ステータスが変化していない
    NoTransition,
    /// 通知先が無い（プロフィールなし、またはトークン未登録）
    RecipientUnresolved(Resolution),
    /// プロフィールストアに到達できなかった
    ResolverFault,
    /// 配送を 1 回試行した
    Dispatched(DeliveryOutcome),
}

/// 注文通知サービス
pub struct OrderNotificationService {
    profile_repository: Arc<dyn OwnerProfileRepository>,
    push_sender:        Arc<dyn PushSender>,
    template:           Arc<dyn NotificationTemplate>,
}

impl OrderNotificationService {
    pub fn new(
        profile_repository: Arc<dyn OwnerProfileRepository>,
        push_sender: Arc<dyn PushSender>,
        template: Arc<dyn NotificationTemplate>,
    ) -> Self {
        Self {
            profile_repository,
            push_sender,
            template,
        }
    }

    /// 注文ドキュメントの更新イベントを処理する（fire-and-forget）
    ///
    /// どのステップで失敗してもエラーを返さない（ログ出力のみ）。
    #[tracing::instrument(
        skip_all,
        fields(
            owner_id = %change.params.owner_id,
            order_id = %change.params.order_id,
        )
    )]
    pub async fn handle(&self, change: &OrderChangeEvent) -> OrderEventOutcome {
        let Some(transition) = change.transition() else {
            tracing::debug!("ステータスに変化がないため通知をスキップ");
            return OrderEventOutcome::NoTransition;
        };

        let resolution = match self.resolve(transition.owner_id()).await {
            Ok(resolution) => resolution,
            Err(e) => {
                tracing::error!(
                    error.category = error::category::INFRASTRUCTURE,
                    error.kind = error::kind::PROFILE_LOOKUP,
                    error = %e,
                    span_trace = %e.span_trace(),
                    "プロフィールの取得に失敗したため通知をスキップ"
                );
                return OrderEventOutcome::ResolverFault;
            }
        };

        let Resolution::Resolved(destination) = resolution else {
            let reason: &str = (&resolution).into();
            log_business_event!(
                event.category = event::category::NOTIFICATION,
                event.action = event::action::NOTIFICATION_SKIPPED,
                event.entity_type = event::entity_type::ORDER,
                event.entity_id = %transition.order_id(),
                event.result = event::result::SKIPPED,
                notification.skip_reason = reason,
                "通知先が未登録のため通知をスキップ"
            );
            return OrderEventOutcome::RecipientUnresolved(resolution);
        };

        OrderEventOutcome::Dispatched(self.dispatch(&destination, &transition).await)
    }

    /// オーナーの現在の通知先を解決する
    ///
    /// プロフィールストアへの 1 回の参照のみ。フォールバックしない。
    pub async fn resolve(&self, owner_id: &OwnerId) -> Result<Resolution, InfraError> {
        let profile = self.profile_repository.find_by_owner_id(owner_id).await?;
        Ok(Resolution::from_profile(profile))
    }

    /// 1 つの通知先へ 1 回だけ配送する
    ///
    /// 配送エラーはここで捕捉してログに残し、呼び出し元へは伝播させない。
    pub async fn dispatch(
        &self,
        destination: &Destination,
        transition: &OrderTransition,
    ) -> DeliveryOutcome {
        let payload = self.template.render(transition);
        let new_status = transition.new_status_label();

        let outcome: DeliveryOutcome = self.push_sender.send(destination, &payload).await.into();

        match &outcome {
            DeliveryOutcome::Sent(response) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_SENT,
                    event.entity_type = event::entity_type::ORDER,
                    event.entity_id = %transition.order_id(),
                    event.result = event::result::SUCCESS,
                    notification.new_status = new_status,
                    notification.provider_response = %response,
                    "プッシュ通知送信成功"
                );
            }
            DeliveryOutcome::Failed(detail) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_FAILED,
                    event.entity_type = event::entity_type::ORDER,
                    event.entity_id = %transition.order_id(),
                    event.result = event::result::FAILURE,
                    error.category = error::category::EXTERNAL_SERVICE,
                    error.kind = error::kind::PUSH_DELIVERY,
                    notification.new_status = new_status,
                    error = %detail,
                    "プッシュ通知送信失敗"
                );
            }
        }

        outcome
    }
}
