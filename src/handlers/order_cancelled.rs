use tracing::info;

use crate::common::dispatcher::{Message, NotificationDispatcher};
use crate::common::errors::Error;
use crate::common::record::{Order, Record};
use crate::common::store::{fetch_user, RecordStore};
use crate::handlers::{Outcome, SkipReason};

pub const TITLE: &str = "Order Cancelled";
pub const SALESMAN_FALLBACK: &str = "Salesman";
pub const CANCEL_FIELD: &str = "Cancel";

/// True only when the cancel flag flips from unset to set.
// TODO: revisit if cancellation ever moves to an order status field.
pub fn is_cancellation(before: &Order, after: &Order) -> bool {
    !before.cancel && after.cancel
}

/// Same transition check on raw snapshots, so updates that are not
/// cancellations never need to decode as an [`Order`].
pub fn is_cancellation_record(before: &Record, after: &Record) -> bool {
    !before.get_bool_or(CANCEL_FIELD, false) && after.get_bool_or(CANCEL_FIELD, false)
}

/// Tells the maker that their order was cancelled.
#[tracing::instrument(skip_all, fields(order_id = %after.order_id, maker_id = %after.maker_id))]
pub async fn handle<S, D>(
    before: &Order,
    after: &Order,
    store: &S,
    dispatcher: &D,
) -> Result<Outcome, Error>
where
    S: RecordStore,
    D: NotificationDispatcher,
{
    if !is_cancellation(before, after) {
        return Ok(Outcome::Skipped(SkipReason::NotCancellation));
    }

    let Some(maker) = fetch_user(store, &after.maker_id).await? else {
        info!("No user record found for maker: {}", after.maker_id);
        return Ok(Outcome::Skipped(SkipReason::MakerNotFound));
    };
    let Some(token) = maker.token() else {
        info!("No FCM token found for maker: {}", after.maker_id);
        return Ok(Outcome::Skipped(SkipReason::MissingToken));
    };

    let salesman_name = match after.salesman_id() {
        Some(salesman_id) => fetch_user(store, salesman_id)
            .await?
            .and_then(|user| user.name)
            .filter(|name| !name.is_empty())
            .unwrap_or(SALESMAN_FALLBACK.into()),
        None => SALESMAN_FALLBACK.into(),
    };

    let message = Message::new(
        token,
        TITLE,
        format!(
            "The order \"{}\" was cancelled by {}.",
            after.order_id, salesman_name
        ),
    );
    let message_id = dispatcher.send(&message).await?;

    info!("Cancellation notification {} sent to maker", message_id);
    Ok(Outcome::Sent { message_id })
}
