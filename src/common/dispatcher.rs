use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::common::config::FcmConfig;
use crate::common::errors::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

/// A push message addressed to a single device token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub token: String,
    pub notification: Notification,
}

impl Message {
    pub fn new(token: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            notification: Notification {
                title: title.into(),
                body: body.into(),
            },
        }
    }
}

#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// Delivers `message` and returns the gateway's message id.
    async fn send(&self, message: &Message) -> Result<String, Error>;
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    message: &'a Message,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    name: String,
}

/// Firebase Cloud Messaging HTTP v1 client.
#[derive(Clone)]
pub struct FcmDispatcher {
    client: reqwest::Client,
    send_url: String,
    access_token: String,
}

impl FcmDispatcher {
    pub fn new(config: &FcmConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: &FcmConfig) -> Self {
        Self {
            client,
            send_url: format!(
                "{}/v1/projects/{}/messages:send",
                config.endpoint.trim_end_matches('/'),
                config.project_id
            ),
            access_token: config.access_token.clone(),
        }
    }

    pub fn send_url(&self) -> &str {
        &self.send_url
    }
}

#[async_trait]
impl NotificationDispatcher for FcmDispatcher {
    async fn send(&self, message: &Message) -> Result<String, Error> {
        debug!("Sending notification \"{}\"", message.notification.title);

        let response = self
            .client
            .post(&self.send_url)
            .bearer_auth(&self.access_token)
            .json(&SendRequest { message })
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(response.json::<SendResponse>().await?.name),
            status => {
                let message = response.text().await.unwrap_or_default();
                Err(Error::Gateway {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}
