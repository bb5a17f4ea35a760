use aws_lambda_events::event::dynamodb::Event;
use aws_lambda_events::event::streams::DynamoDbEventResponse;
use lambda_runtime::{run, service_fn, Error as LambdaError, LambdaEvent};
use tracing::info;

use order_notify::common::context;
use order_notify::common::utils::init_tracing;
use order_notify::handlers::{process_event, Trigger};

#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    init_tracing();

    let ctx = context::bootstrap().await?;
    let ctx = &ctx;
    info!("Starting order-assigned handler");

    run(service_fn(move |event: LambdaEvent<Event>| async move {
        let batch = process_event(event.payload, Trigger::OrderAssigned, ctx).await?;
        info!("Processed {} order records", batch.outcomes.len());
        Ok::<DynamoDbEventResponse, LambdaError>(batch.into_response())
    }))
    .await
}
