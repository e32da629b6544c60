//! Generic typed bucket store
//!
//! A bucket is one hash in the backing store holding every record of one
//! entity kind for one owner. `BucketStore<S>` handles the parts that are the
//! same for every entity kind (bucket naming, encoding, decoding); the
//! `BucketSpec` strategy supplies the parts that differ.
//!
//! ```text
//! ChannelService ──► BucketStore<ChannelBucket> ──► HashStore
//!                       │
//!                       └─ bucket = prefix("channels") + owner_token(app_key)
//! ```

use onepush_core::{Codec, Error, HashStore, KeySpace, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::codec::JsonCodec;

/// Layout of one entity kind in the backing store.
///
/// # Example
/// ```no_run
/// # use onepush_core::{ChannelEntity, Result};
/// # use onepush_storage::BucketSpec;
/// struct ChannelBucket;
///
/// impl BucketSpec for ChannelBucket {
///     type Value = ChannelEntity;
///     type Owner = str;
///     const SEGMENT: &'static str = "channels";
///
///     fn owner_token(app_key: &str) -> Result<String> {
///         Ok(app_key.to_string())
///     }
/// }
/// ```
pub trait BucketSpec: Send + Sync + 'static {
    /// Record type stored in each field
    type Value: Serialize + DeserializeOwned + Send + Sync;

    /// What a bucket is selected by (an account, an app key, a composite owner)
    type Owner: ?Sized + Sync;

    /// Namespace segment under the key space root
    const SEGMENT: &'static str;

    /// Flatten an owner into the token appended to the bucket prefix.
    fn owner_token(owner: &Self::Owner) -> Result<String>;
}

/// Typed access to the buckets of one entity kind.
pub struct BucketStore<S: BucketSpec, C: Codec = JsonCodec> {
    store: Arc<dyn HashStore>,
    prefix: String,
    codec: C,
    _spec: PhantomData<fn() -> S>,
}

impl<S: BucketSpec> BucketStore<S, JsonCodec> {
    pub fn new(store: Arc<dyn HashStore>, keys: &KeySpace) -> Self {
        Self::with_codec(store, keys, JsonCodec)
    }
}

impl<S: BucketSpec, C: Codec> BucketStore<S, C> {
    pub fn with_codec(store: Arc<dyn HashStore>, keys: &KeySpace, codec: C) -> Self {
        Self {
            store,
            prefix: keys.bucket_prefix(S::SEGMENT),
            codec,
            _spec: PhantomData,
        }
    }

    /// Full bucket name for an owner: prefix followed by the owner token.
    pub fn bucket_name(&self, owner: &S::Owner) -> Result<String> {
        Ok(format!("{}{}", self.prefix, S::owner_token(owner)?))
    }

    /// Load every record in the owner's bucket.
    ///
    /// Decoding stops at the first bad field and nothing is returned.
    pub async fn list(&self, owner: &S::Owner) -> Result<HashMap<String, S::Value>> {
        let bucket = self.bucket_name(owner)?;
        let fields = self.store.get_all(&bucket).await?;

        let mut output = HashMap::with_capacity(fields.len());
        for (field, data) in fields {
            let value = self.decode(&bucket, &field, &data)?;
            output.insert(field, value);
        }
        Ok(output)
    }

    /// Write one record, replacing any previous value under `field`.
    pub async fn store(&self, owner: &S::Owner, field: &str, value: &S::Value) -> Result<()> {
        let data = self
            .codec
            .encode(value)
            .map_err(|e| Error::Encode(e.to_string()))?;
        let bucket = self.bucket_name(owner)?;
        self.store.set(&bucket, field, data).await
    }

    /// Read one record. A missing field, a missing bucket and an empty stored
    /// value are all `None`.
    pub async fn load(&self, owner: &S::Owner, field: &str) -> Result<Option<S::Value>> {
        let bucket = self.bucket_name(owner)?;
        match self.store.get(&bucket, field).await? {
            Some(data) if !data.is_empty() => Ok(Some(self.decode(&bucket, field, &data)?)),
            _ => Ok(None),
        }
    }

    /// Check for a record without decoding it.
    pub async fn exists(&self, owner: &S::Owner, field: &str) -> Result<bool> {
        let bucket = self.bucket_name(owner)?;
        self.store.exists(&bucket, field).await
    }

    /// Delete one record. Removing a missing record succeeds.
    pub async fn remove(&self, owner: &S::Owner, field: &str) -> Result<()> {
        let bucket = self.bucket_name(owner)?;
        self.store.delete(&bucket, field).await
    }

    fn decode(&self, bucket: &str, field: &str, data: &str) -> Result<S::Value> {
        self.codec.decode(data).map_err(|e| Error::Decode {
            bucket: bucket.to_string(),
            field: field.to_string(),
            reason: e.to_string(),
        })
    }
}
