use tracing::info;

use crate::common::dispatcher::{Message, NotificationDispatcher};
use crate::common::errors::Error;
use crate::common::record::Order;
use crate::common::store::{fetch_user, RecordStore};
use crate::handlers::{Outcome, SkipReason};

pub const TITLE: &str = "New Order Received";
pub const SALESMAN_FALLBACK: &str = "a salesman";

/// Notifies the maker that a salesman placed a new order for them.
#[tracing::instrument(skip_all, fields(order_id = %order.order_id, maker_id = %order.maker_id))]
pub async fn handle<S, D>(order: &Order, store: &S, dispatcher: &D) -> Result<Outcome, Error>
where
    S: RecordStore,
    D: NotificationDispatcher,
{
    let Some(maker) = fetch_user(store, &order.maker_id).await? else {
        info!("No user record found for maker: {}", order.maker_id);
        return Ok(Outcome::Skipped(SkipReason::MakerNotFound));
    };
    let Some(token) = maker.token() else {
        info!("No FCM token found for maker: {}", order.maker_id);
        return Ok(Outcome::Skipped(SkipReason::MissingToken));
    };

    let salesman = match order.salesman_id() {
        Some(salesman_id) => fetch_user(store, salesman_id).await?,
        None => None,
    };
    let salesman_name = salesman
        .as_ref()
        .map_or(SALESMAN_FALLBACK, |user| user.name_or(SALESMAN_FALLBACK));

    let message = Message::new(
        token,
        TITLE,
        format!("You have a new order from {salesman_name}"),
    );
    let message_id = dispatcher.send(&message).await?;

    info!("Notification {} sent to maker: {}", message_id, order.maker_id);
    Ok(Outcome::Sent { message_id })
}
