use serde_dynamo::Item;
use serde_json::Value;

use crate::common::errors::Error;
use crate::common::record::Record;

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .without_time() // CloudWatch will add the ingestion time
        .with_target(false)
        .init();
}

/// Converts a stream image into a record. Returns `None` for an empty image,
/// which is what the stream delivers when the view type omits that side.
pub fn decode_image(image: Item) -> Result<Option<Record>, Error> {
    let value: Value = serde_dynamo::from_item(image)?;
    let record = Record::from_value(value);

    if record.is_empty() {
        return Ok(None);
    }

    Ok(Some(record))
}
