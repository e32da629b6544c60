//! Common test utilities for integration tests

use async_trait::async_trait;
use onepush_core::{Error, HashStore, Result};
use onepush_storage::MemoryHashStore;
use std::collections::HashMap;
use std::sync::Mutex;

/// Install a test subscriber once; later calls are no-ops.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("onepush_service=debug,onepush_storage=debug")
        .with_test_writer()
        .try_init();
}

/// In-memory store whose writes to selected buckets fail on demand
#[derive(Default)]
#[allow(dead_code)]
pub struct FlakyStore {
    inner: MemoryHashStore,
    failing_suffix: Mutex<Option<String>>,
}

#[allow(dead_code)]
impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every `set`/`delete` on buckets whose name ends with `suffix`
    pub fn fail_writes_to(&self, suffix: &str) {
        *self.failing_suffix.lock().unwrap() = Some(suffix.to_string());
    }

    pub fn heal(&self) {
        *self.failing_suffix.lock().unwrap() = None;
    }

    fn check_write(&self, bucket: &str) -> Result<()> {
        match self.failing_suffix.lock().unwrap().as_deref() {
            Some(suffix) if bucket.ends_with(suffix) => {
                tracing::debug!("Injecting write failure for {}", bucket);
                Err(Error::unavailable(format!("injected failure on {}", bucket)))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl HashStore for FlakyStore {
    async fn get_all(&self, bucket: &str) -> Result<HashMap<String, String>> {
        self.inner.get_all(bucket).await
    }

    async fn get(&self, bucket: &str, field: &str) -> Result<Option<String>> {
        self.inner.get(bucket, field).await
    }

    async fn set(&self, bucket: &str, field: &str, value: String) -> Result<()> {
        self.check_write(bucket)?;
        self.inner.set(bucket, field, value).await
    }

    async fn delete(&self, bucket: &str, field: &str) -> Result<()> {
        self.check_write(bucket)?;
        self.inner.delete(bucket, field).await
    }

    async fn exists(&self, bucket: &str, field: &str) -> Result<bool> {
        self.inner.exists(bucket, field).await
    }
}
