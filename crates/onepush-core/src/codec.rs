//! Value codec trait

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{0}")]
pub struct CodecError(pub String);

/// Converts entity values to and from the string form kept in a bucket field.
///
/// `decode(encode(v))` must equal `v` for every value the codec accepts, and a
/// decode failure must be reported as an error rather than a default value.
pub trait Codec: Send + Sync {
    fn encode<T: Serialize>(&self, value: &T) -> Result<String, CodecError>;

    fn decode<T: DeserializeOwned>(&self, data: &str) -> Result<T, CodecError>;
}
