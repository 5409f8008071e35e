//! # 通知テンプレート
//!
//! ステータス遷移からプッシュ通知ペイロードを組み立てる。
//!
//! 検出・解決・配送のパイプラインは 1 本だけで、通知の種類ごとの違いは
//! このテンプレートの差し替えで表す。

use orderflow_domain::{notification::NotificationPayload, order::OrderTransition};

/// 注文ステータス変更通知のタイトル
const ORDER_STATUS_TITLE: &str = "Order Status Changed";

/// 通知テンプレート
///
/// 同じ遷移からは常に同じペイロードを返すこと。
pub trait NotificationTemplate: Send + Sync {
    fn render(&self, transition: &OrderTransition) -> NotificationPayload;
}

/// 注文ステータス変更テンプレート
///
/// - タイトル: `Order Status Changed`
/// - 本文: `Your order #{order_id} is now {new_status}`
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderStatusTemplate;

impl NotificationTemplate for OrderStatusTemplate {
    fn render(&self, transition: &OrderTransition) -> NotificationPayload {
        NotificationPayload {
            title: ORDER_STATUS_TITLE.to_string(),
            body:  format!(
                "Your order #{} is now {}",
                transition.order_id(),
                transition.new_status_label()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use orderflow_domain::{
        order::{OrderId, OrderPath, RecordSnapshot},
        owner::OwnerId,
    };
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn transition(order_id: &str, before: serde_json::Value, after: serde_json::Value) -> OrderTransition {
        let path = OrderPath {
            owner_id: OwnerId::new("user-1"),
            order_id: OrderId::new(order_id),
        };
        OrderTransition::detect(&path, &RecordSnapshot::new(before), &RecordSnapshot::new(after))
            .unwrap()
    }

    #[test]
    fn タイトルと本文に注文idと新ステータスが入る() {
        let payload = OrderStatusTemplate.render(&transition(
            "42",
            json!({"status": "pending"}),
            json!({"status": "shipped"}),
        ));

        assert_eq!(
            payload,
            NotificationPayload {
                title: "Order Status Changed".to_string(),
                body:  "Your order #42 is now shipped".to_string(),
            }
        );
    }

    #[test]
    fn ステータスが消えた場合はunknownと表示する() {
        let payload =
            OrderStatusTemplate.render(&transition("7", json!({"status": "paid"}), json!({})));

        assert_eq!(payload.body, "Your order #7 is now unknown");
    }
}
