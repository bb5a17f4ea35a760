use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::common::errors::Error;

/// A schemaless document snapshot as read from the store or a stream image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Wraps a JSON value; anything other than an object becomes an empty record.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self(fields),
            _ => Self::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Non-empty string value of `field`, if any.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.0
            .get(field)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn get_str_or<'a>(&'a self, field: &str, default: &'a str) -> &'a str {
        self.get_str(field).unwrap_or(default)
    }

    pub fn get_bool_or(&self, field: &str, default: bool) -> bool {
        self.0.get(field).and_then(Value::as_bool).unwrap_or(default)
    }

    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, Error> {
        Ok(serde_json::from_value(Value::Object(self.0.clone()))?)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "orderId", default)]
    pub order_id: String,
    #[serde(rename = "makerId")]
    pub maker_id: String,
    #[serde(rename = "salesmanID", default, skip_serializing_if = "Option::is_none")]
    pub salesman_id: Option<String>,
    #[serde(rename = "salesmanName", default, skip_serializing_if = "Option::is_none")]
    pub salesman_name: Option<String>,
    #[serde(rename = "Cancel", default)]
    pub cancel: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Order {
    pub fn salesman_id(&self) -> Option<&str> {
        self.salesman_id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn name_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(default)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        rename = "fcmToken",
        alias = "fcm_token",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub fcm_token: Option<String>,
}

impl User {
    /// Device token, treating an empty string as unregistered.
    pub fn token(&self) -> Option<&str> {
        self.fcm_token.as_deref().filter(|token| !token.is_empty())
    }

    pub fn name_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(default)
    }
}
