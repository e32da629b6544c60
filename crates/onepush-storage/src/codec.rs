//! JSON value codec

use onepush_core::{Codec, CodecError};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Stores values as compact JSON, the format every OnePush producer writes.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<String, CodecError> {
        serde_json::to_string(value).map_err(|e| CodecError(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(&self, data: &str) -> Result<T, CodecError> {
        serde_json::from_str(data).map_err(|e| CodecError(e.to_string()))
    }
}
