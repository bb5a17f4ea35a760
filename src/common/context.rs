use aws_config::BehaviorVersion;
use tracing::info;

use crate::common::config::Config;
use crate::common::dispatcher::{FcmDispatcher, NotificationDispatcher};
use crate::common::errors::Error;
use crate::common::store::{DynamoRecordStore, RecordStore};
use crate::common::{ORDERS_COLLECTION, USERS_COLLECTION};

/// Handles shared by every invocation of a Lambda process.
pub struct Context<S, D> {
    pub store: S,
    pub dispatcher: D,
}

impl<S, D> Context<S, D>
where
    S: RecordStore,
    D: NotificationDispatcher,
{
    pub fn new(store: S, dispatcher: D) -> Self {
        Self { store, dispatcher }
    }
}

/// One-time process setup: reads the environment and builds the SDK clients.
pub async fn bootstrap() -> Result<Context<DynamoRecordStore, FcmDispatcher>, Error> {
    let config = Config::from_env()?;
    info!(
        "Bootstrapping with users table {} and FCM project {}",
        config.users_table, config.fcm.project_id
    );

    let aws_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let dynamo_client = aws_sdk_dynamodb::Client::new(&aws_config);

    let store = DynamoRecordStore::new(dynamo_client, config.key_attribute.as_str())
        .with_table(USERS_COLLECTION, config.users_table.as_str())
        .with_table(ORDERS_COLLECTION, config.orders_table.as_str());
    let dispatcher = FcmDispatcher::new(&config.fcm);

    Ok(Context::new(store, dispatcher))
}
