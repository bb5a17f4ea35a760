use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("missing environment variable {0}")]
    MissingEnv(&'static str),

    #[error("failed to decode dynamodb image: {0}")]
    Dynamo(#[from] serde_dynamo::Error),

    #[error("failed to decode record: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("record lookup failed: {0}")]
    Lookup(#[from] Box<SdkError<GetItemError>>),

    #[error("notification request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("notification gateway rejected message ({status}): {message}")]
    Gateway { status: u16, message: String },
}

impl Error {
    /// Decode failures repeat on every redelivery of the same stream record.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Error::Dynamo(_) | Error::Decode(_))
    }
}
