//! Hash store trait
//!
//! The `HashStore` trait abstracts the backing store OnePush keeps its
//! configuration in: a set of named hashes (buckets), each mapping string
//! field keys to string values. Redis hashes are the production model; the
//! storage crate ships an in-memory implementation.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::Result;

/// Backing store for owner-scoped buckets.
///
/// Implementations must give per-field atomicity. Nothing here spans more
/// than one field, so callers that write two related fields must tolerate
/// observing one without the other.
///
/// # Errors
/// Every method fails with `Error::StoreUnavailable` when the store cannot be
/// reached. A missing bucket or field is never an error.
///
/// # Example
/// ```no_run
/// # use onepush_core::HashStore;
/// # async fn example(store: &dyn HashStore) -> onepush_core::Result<()> {
/// store.set("onepush::core::ownedapps", "k1", "acc".to_string()).await?;
/// assert_eq!(store.get("onepush::core::ownedapps", "k1").await?.as_deref(), Some("acc"));
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait HashStore: Send + Sync {
    /// Get every field of a bucket. A missing bucket yields an empty map.
    async fn get_all(&self, bucket: &str) -> Result<HashMap<String, String>>;

    /// Get one field, `None` if the field or bucket does not exist.
    async fn get(&self, bucket: &str, field: &str) -> Result<Option<String>>;

    /// Insert or overwrite one field.
    async fn set(&self, bucket: &str, field: &str, value: String) -> Result<()>;

    /// Delete one field. Deleting a missing field succeeds.
    async fn delete(&self, bucket: &str, field: &str) -> Result<()>;

    /// Check whether a field exists without reading it.
    async fn exists(&self, bucket: &str, field: &str) -> Result<bool>;
}

#[async_trait]
impl<S: HashStore + ?Sized> HashStore for Arc<S> {
    async fn get_all(&self, bucket: &str) -> Result<HashMap<String, String>> {
        (**self).get_all(bucket).await
    }

    async fn get(&self, bucket: &str, field: &str) -> Result<Option<String>> {
        (**self).get(bucket, field).await
    }

    async fn set(&self, bucket: &str, field: &str, value: String) -> Result<()> {
        (**self).set(bucket, field, value).await
    }

    async fn delete(&self, bucket: &str, field: &str) -> Result<()> {
        (**self).delete(bucket, field).await
    }

    async fn exists(&self, bucket: &str, field: &str) -> Result<bool> {
        (**self).exists(bucket, field).await
    }
}
