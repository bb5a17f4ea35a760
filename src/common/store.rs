use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use tracing::debug;

use crate::common::errors::Error;
use crate::common::record::{Record, User};
use crate::common::USERS_COLLECTION;

/// Read-only, single-key access to the document store.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn get(&self, collection: &str, key: &str) -> Result<Option<Record>, Error>;
}

/// Fetches and decodes a user record.
pub async fn fetch_user<S>(store: &S, user_id: &str) -> Result<Option<User>, Error>
where
    S: RecordStore + ?Sized,
{
    match store.get(USERS_COLLECTION, user_id).await? {
        Some(record) => Ok(Some(record.decode()?)),
        None => Ok(None),
    }
}

#[derive(Clone)]
pub struct DynamoRecordStore {
    client: aws_sdk_dynamodb::Client,
    key_attribute: String,
    tables: HashMap<String, String>,
}

impl DynamoRecordStore {
    pub fn new(client: aws_sdk_dynamodb::Client, key_attribute: impl Into<String>) -> Self {
        Self {
            client,
            key_attribute: key_attribute.into(),
            tables: HashMap::new(),
        }
    }

    /// Maps a logical collection onto a physical table name.
    pub fn with_table(mut self, collection: impl Into<String>, table: impl Into<String>) -> Self {
        self.tables.insert(collection.into(), table.into());
        self
    }

    pub fn table_name<'a>(&'a self, collection: &'a str) -> &'a str {
        self.tables
            .get(collection)
            .map(String::as_str)
            .unwrap_or(collection)
    }
}

#[async_trait]
impl RecordStore for DynamoRecordStore {
    async fn get(&self, collection: &str, key: &str) -> Result<Option<Record>, Error> {
        let table_name = self.table_name(collection);
        debug!("Fetching {} from {}", key, table_name);

        let output = self
            .client
            .get_item()
            .table_name(table_name)
            .key(&self.key_attribute, AttributeValue::S(key.into()))
            .send()
            .await
            .map_err(Box::new)?;

        let Some(item) = output.item else {
            return Ok(None);
        };

        let value: serde_json::Value = serde_dynamo::aws_sdk_dynamodb_1::from_item(item)?;
        Ok(Some(Record::from_value(value)))
    }
}
