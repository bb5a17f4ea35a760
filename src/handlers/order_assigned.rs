//! Earlier revision of the order-created notification, kept deployable as its
//! own binary. It notifies the assigned salesman instead of the maker and logs
//! gateway failures instead of failing the invocation. An order without a
//! `name` still gets a body, ending in "for " with nothing after it, as the
//! earlier revision produced.

use tracing::{error, info};

use crate::common::dispatcher::{Message, NotificationDispatcher};
use crate::common::errors::Error;
use crate::common::record::Order;
use crate::common::store::{fetch_user, RecordStore};
use crate::handlers::{Outcome, SkipReason};

pub const TITLE: &str = "New Order Assigned";

#[tracing::instrument(skip_all, fields(order_id = %order.order_id))]
pub async fn handle<S, D>(order: &Order, store: &S, dispatcher: &D) -> Result<Outcome, Error>
where
    S: RecordStore,
    D: NotificationDispatcher,
{
    let Some(salesman_id) = order.salesman_id() else {
        info!("Order has no salesman assigned");
        return Ok(Outcome::Skipped(SkipReason::MissingSalesman));
    };

    let token = match fetch_user(store, salesman_id).await? {
        Some(salesman) => salesman.token().map(str::to_owned),
        None => None,
    };
    let Some(token) = token else {
        info!("No FCM token found for salesman ID: {}", salesman_id);
        return Ok(Outcome::Skipped(SkipReason::MissingToken));
    };

    let message = Message::new(
        token,
        TITLE,
        format!("Order ID: {} for {}", order.order_id, order.name_or("")),
    );

    match dispatcher.send(&message).await {
        Ok(message_id) => {
            info!("Notification sent to: {}", salesman_id);
            Ok(Outcome::Sent { message_id })
        }
        Err(err) => {
            error!("Error sending notification: {}", err);
            Ok(Outcome::Skipped(SkipReason::DispatchFailed))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::fakes::{InMemoryStore, RecordingDispatcher};
    use serde_json::json;

    fn order() -> Order {
        Order {
            order_id: "O7".into(),
            maker_id: "M1".into(),
            salesman_id: Some("S1".into()),
            name: Some("Blue paint".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn notifies_salesman() {
        let store = InMemoryStore::default().with_user("S1", json!({"fcm_token": "tok-s1"}));
        let dispatcher = RecordingDispatcher::default();

        let outcome = handle(&order(), &store, &dispatcher).await.unwrap();

        assert!(matches!(outcome, Outcome::Sent { .. }));
        assert_eq!(
            dispatcher.sent(),
            vec![Message::new("tok-s1", TITLE, "Order ID: O7 for Blue paint")]
        );
    }

    #[tokio::test]
    async fn missing_order_name_leaves_body_open_ended() {
        let store = InMemoryStore::default().with_user("S1", json!({"fcmToken": "tok-s1"}));
        let dispatcher = RecordingDispatcher::default();
        let order = Order { name: None, ..order() };

        handle(&order, &store, &dispatcher).await.unwrap();

        assert_eq!(dispatcher.sent()[0].notification.body, "Order ID: O7 for ");
    }

    #[tokio::test]
    async fn order_without_salesman_is_skipped() {
        let store = InMemoryStore::default();
        let dispatcher = RecordingDispatcher::default();
        let order = Order {
            salesman_id: None,
            ..order()
        };

        let outcome = handle(&order, &store, &dispatcher).await.unwrap();

        assert_eq!(outcome, Outcome::Skipped(SkipReason::MissingSalesman));
        assert!(store.lookups().is_empty());
    }

    #[tokio::test]
    async fn salesman_without_token_is_skipped() {
        let store = InMemoryStore::default().with_user("S1", json!({"name": "Bob"}));
        let dispatcher = RecordingDispatcher::default();

        let outcome = handle(&order(), &store, &dispatcher).await.unwrap();

        assert_eq!(outcome, Outcome::Skipped(SkipReason::MissingToken));
        assert!(dispatcher.sent().is_empty());
    }

    #[tokio::test]
    async fn dispatch_error_is_swallowed() {
        let store = InMemoryStore::default().with_user("S1", json!({"fcmToken": "tok-s1"}));
        let dispatcher = RecordingDispatcher::failing(500);

        let outcome = handle(&order(), &store, &dispatcher).await.unwrap();

        assert_eq!(outcome, Outcome::Skipped(SkipReason::DispatchFailed));
        assert_eq!(dispatcher.sent().len(), 1);
    }
}
