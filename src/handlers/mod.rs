pub mod order_assigned;
pub mod order_cancelled;
pub mod order_created;

use aws_lambda_events::event::dynamodb::{Event, EventRecord};
use aws_lambda_events::event::streams::{DynamoDbBatchItemFailure, DynamoDbEventResponse};
use tracing::{debug, error, info, warn};

use crate::common::context::Context;
use crate::common::dispatcher::NotificationDispatcher;
use crate::common::errors::Error;
use crate::common::record::Order;
use crate::common::store::RecordStore;
use crate::common::utils::decode_image;

const INSERT_EVENT: &str = "INSERT";
const MODIFY_EVENT: &str = "MODIFY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Sent { message_id: String },
    Skipped(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The update did not flip the cancel flag from false to true.
    NotCancellation,
    MakerNotFound,
    MissingToken,
    MissingSalesman,
    /// Snapshot could not be decoded; redelivery would fail the same way.
    Malformed,
    /// Legacy handler only: the gateway rejected the message and the error was logged.
    DispatchFailed,
}

/// Which handler a Lambda binary runs for the orders stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    OrderCreated,
    OrderUpdated,
    OrderAssigned,
}

impl Trigger {
    fn event_name(self) -> &'static str {
        match self {
            Trigger::OrderCreated | Trigger::OrderAssigned => INSERT_EVENT,
            Trigger::OrderUpdated => MODIFY_EVENT,
        }
    }
}

/// Result of one stream batch.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub outcomes: Vec<Outcome>,
    /// Sequence number of the first record that failed with a retryable error.
    /// Every record after it was left unprocessed.
    pub failed_sequence_number: Option<String>,
}

impl BatchOutcome {
    /// Partial batch response: the stream resumes from the failed record, so
    /// records before it are not redelivered.
    pub fn into_response(self) -> DynamoDbEventResponse {
        let mut response = DynamoDbEventResponse {
            batch_item_failures: Vec::new(),
        };
        if let Some(sequence_number) = self.failed_sequence_number {
            let failure = DynamoDbBatchItemFailure {
                item_identifier: Some(sequence_number),
            };
            response.batch_item_failures.push(failure);
        }
        response
    }
}

/// Runs every matching record of a stream batch through the trigger's handler,
/// in order. Processing stops at the first retryable failure, which is reported
/// by sequence number. Records that cannot be decoded are logged and skipped.
/// A retryable failure on a record without a sequence number fails the whole
/// invocation.
pub async fn process_event<S, D>(
    event: Event,
    trigger: Trigger,
    ctx: &Context<S, D>,
) -> Result<BatchOutcome, Error>
where
    S: RecordStore,
    D: NotificationDispatcher,
{
    info!("Received {} stream records", event.records.len());

    let mut batch = BatchOutcome {
        outcomes: Vec::with_capacity(event.records.len()),
        failed_sequence_number: None,
    };
    for record in event.records {
        if record.event_name != trigger.event_name() {
            debug!("Ignoring {} record {}", record.event_name, record.event_id);
            continue;
        }

        let event_id = record.event_id.clone();
        let sequence_number = record.change.sequence_number.clone();

        match process_record(record, trigger, ctx).await {
            Ok(Some(outcome)) => batch.outcomes.push(outcome),
            Ok(None) => {}
            Err(err) if !err.is_retryable() => {
                error!("Dropping malformed record {}: {}", event_id, err);
                batch.outcomes.push(Outcome::Skipped(SkipReason::Malformed));
            }
            Err(err) => {
                let Some(sequence_number) = sequence_number else {
                    return Err(err);
                };
                error!("Record {} failed, reporting {}: {}", event_id, sequence_number, err);
                batch.failed_sequence_number = Some(sequence_number);
                break;
            }
        }
    }

    Ok(batch)
}

async fn process_record<S, D>(
    record: EventRecord,
    trigger: Trigger,
    ctx: &Context<S, D>,
) -> Result<Option<Outcome>, Error>
where
    S: RecordStore,
    D: NotificationDispatcher,
{
    let Some(after) = decode_image(record.change.new_image)? else {
        warn!("Record {} has no new image", record.event_id);
        return Ok(None);
    };

    let outcome = match trigger {
        Trigger::OrderCreated => {
            let order: Order = after.decode()?;
            order_created::handle(&order, &ctx.store, &ctx.dispatcher).await?
        }
        Trigger::OrderAssigned => {
            let order: Order = after.decode()?;
            order_assigned::handle(&order, &ctx.store, &ctx.dispatcher).await?
        }
        Trigger::OrderUpdated => {
            let Some(before) = decode_image(record.change.old_image)? else {
                warn!(
                    "Record {} has no old image, stream must use NEW_AND_OLD_IMAGES",
                    record.event_id
                );
                return Ok(None);
            };
            if !order_cancelled::is_cancellation_record(&before, &after) {
                return Ok(Some(Outcome::Skipped(SkipReason::NotCancellation)));
            }
            let before: Order = before.decode()?;
            let after: Order = after.decode()?;
            order_cancelled::handle(&before, &after, &ctx.store, &ctx.dispatcher).await?
        }
    };

    Ok(Some(outcome))
}
