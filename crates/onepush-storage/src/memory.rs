//! In-memory hash store with optional JSON snapshots

use async_trait::async_trait;
use onepush_core::{Error, HashStore, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::snapshot::write_snapshot;

type Buckets = HashMap<String, HashMap<String, String>>;

/// Process-local `HashStore`.
///
/// Mirrors Redis hash semantics: a bucket disappears once its last field is
/// deleted. When opened with a snapshot path the full contents can be
/// persisted to, and reloaded from, a JSON file.
#[derive(Debug, Default)]
pub struct MemoryHashStore {
    buckets: RwLock<Buckets>,
    snapshot_path: Option<PathBuf>,
}

impl MemoryHashStore {
    /// Create an empty store with no snapshot file
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a store backed by a snapshot file, loading it if present
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let buckets: Buckets = match tokio::fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                Error::Config(format!(
                    "Invalid snapshot {}: {}",
                    path.display(),
                    e
                ))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No snapshot at {:?}, starting empty", path);
                Buckets::new()
            }
            Err(e) => return Err(Error::Io(e)),
        };

        info!(
            "Opened memory store from {:?} with {} buckets",
            path,
            buckets.len()
        );

        Ok(Self {
            buckets: RwLock::new(buckets),
            snapshot_path: Some(path),
        })
    }

    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot_path.as_deref()
    }

    /// Write the current contents to the snapshot file.
    ///
    /// Does nothing for stores created without a snapshot path.
    pub async fn persist(&self) -> Result<()> {
        let Some(path) = &self.snapshot_path else {
            return Ok(());
        };

        let content = {
            let buckets = self.buckets.read().await;
            serde_json::to_vec_pretty(&*buckets)
                .map_err(|e| Error::Encode(format!("Failed to serialize snapshot: {}", e)))?
        };

        write_snapshot(path, &content)?;
        debug!("Persisted memory store to {:?}", path);
        Ok(())
    }
}

#[async_trait]
impl HashStore for MemoryHashStore {
    async fn get_all(&self, bucket: &str) -> Result<HashMap<String, String>> {
        let buckets = self.buckets.read().await;
        Ok(buckets.get(bucket).cloned().unwrap_or_default())
    }

    async fn get(&self, bucket: &str, field: &str) -> Result<Option<String>> {
        let buckets = self.buckets.read().await;
        Ok(buckets.get(bucket).and_then(|fields| fields.get(field)).cloned())
    }

    async fn set(&self, bucket: &str, field: &str, value: String) -> Result<()> {
        let mut buckets = self.buckets.write().await;
        buckets
            .entry(bucket.to_string())
            .or_default()
            .insert(field.to_string(), value);
        Ok(())
    }

    async fn delete(&self, bucket: &str, field: &str) -> Result<()> {
        let mut buckets = self.buckets.write().await;
        if let Some(fields) = buckets.get_mut(bucket) {
            fields.remove(field);
            if fields.is_empty() {
                buckets.remove(bucket);
            }
        }
        Ok(())
    }

    async fn exists(&self, bucket: &str, field: &str) -> Result<bool> {
        let buckets = self.buckets.read().await;
        Ok(buckets
            .get(bucket)
            .is_some_and(|fields| fields.contains_key(field)))
    }
}
