use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::common::dispatcher::{Message, NotificationDispatcher};
use crate::common::errors::Error;
use crate::common::record::Record;
use crate::common::store::RecordStore;
use crate::common::USERS_COLLECTION;

#[derive(Default)]
pub struct InMemoryStore {
    records: HashMap<(String, String), Record>,
    lookups: Mutex<Vec<(String, String)>>,
}

impl InMemoryStore {
    pub fn with_user(mut self, id: &str, fields: Value) -> Self {
        self.records.insert(
            (USERS_COLLECTION.to_string(), id.to_string()),
            Record::from_value(fields),
        );
        self
    }

    pub fn lookups(&self) -> Vec<(String, String)> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn get(&self, collection: &str, key: &str) -> Result<Option<Record>, Error> {
        self.lookups
            .lock()
            .unwrap()
            .push((collection.to_string(), key.to_string()));
        Ok(self
            .records
            .get(&(collection.to_string(), key.to_string()))
            .cloned())
    }
}

#[derive(Default)]
pub struct RecordingDispatcher {
    sent: Mutex<Vec<Message>>,
    fail_with: Option<u16>,
    fail_on: Option<usize>,
}

impl RecordingDispatcher {
    pub fn failing(status: u16) -> Self {
        Self {
            fail_with: Some(status),
            ..Default::default()
        }
    }

    /// Fails only the `attempt`-th send, counting from one.
    pub fn failing_on(attempt: usize, status: u16) -> Self {
        Self {
            fail_with: Some(status),
            fail_on: Some(attempt),
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<Message> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationDispatcher for RecordingDispatcher {
    async fn send(&self, message: &Message) -> Result<String, Error> {
        let mut sent = self.sent.lock().unwrap();
        sent.push(message.clone());

        let attempt = sent.len();
        match self.fail_with {
            Some(status) if self.fail_on.map_or(true, |n| n == attempt) => Err(Error::Gateway {
                status,
                message: "unavailable".into(),
            }),
            _ => Ok(format!("projects/test/messages/{attempt}")),
        }
    }
}
