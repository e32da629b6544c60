//! Channel service

use onepush_core::{ChannelEntity, ChannelType, HashStore, KeySpace, Presence, Result};
use onepush_storage::{BucketSpec, BucketStore};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error};

/// Channels are bucketed per application and keyed by channel type.
pub struct ChannelBucket;

impl BucketSpec for ChannelBucket {
    type Value = ChannelEntity;
    type Owner = str;
    const SEGMENT: &'static str = "channels";

    fn owner_token(app_key: &str) -> Result<String> {
        Ok(app_key.to_string())
    }
}

pub struct ChannelService {
    bucket: BucketStore<ChannelBucket>,
}

impl ChannelService {
    pub fn new(store: Arc<dyn HashStore>, keys: &KeySpace) -> Self {
        Self {
            bucket: BucketStore::new(store, keys),
        }
    }

    /// Every channel configured for an application, by type.
    pub async fn list(&self, app_key: &str) -> Result<HashMap<ChannelType, ChannelEntity>> {
        let channels = self.bucket.list(app_key).await.map_err(|e| {
            error!(%app_key, error = %e, "Failed to list channels");
            e
        })?;

        Ok(channels
            .into_iter()
            .map(|(field, channel)| (ChannelType::from(field), channel))
            .collect())
    }

    /// Write a channel under its own `app_key` and `channel_type`.
    pub async fn store(&self, channel: &ChannelEntity) -> Result<()> {
        let app_key = channel.app_key.as_str();
        let channel_type = channel.channel_type.as_str();

        self.bucket
            .store(app_key, channel_type, channel)
            .await
            .map_err(|e| {
                error!(%app_key, %channel_type, error = %e, "Failed to store channel");
                e
            })?;

        debug!(%app_key, %channel_type, "Stored channel");
        Ok(())
    }

    pub async fn load(
        &self,
        app_key: &str,
        channel_type: &ChannelType,
    ) -> Result<Option<ChannelEntity>> {
        self.bucket
            .load(app_key, channel_type.as_str())
            .await
            .map_err(|e| {
                error!(%app_key, %channel_type, error = %e, "Failed to load channel");
                e
            })
    }

    pub async fn presence(&self, app_key: &str, channel_type: &ChannelType) -> Result<Presence> {
        Ok(self
            .bucket
            .exists(app_key, channel_type.as_str())
            .await?
            .into())
    }

    /// Boolean form of [`presence`](Self::presence); errors are logged and read as `false`.
    pub async fn exists(&self, app_key: &str, channel_type: &ChannelType) -> bool {
        match self.presence(app_key, channel_type).await {
            Ok(presence) => presence.is_present(),
            Err(e) => {
                error!(%app_key, %channel_type, error = %e, "Failed to check channel existence");
                false
            }
        }
    }

    pub async fn remove(&self, app_key: &str, channel_type: &ChannelType) -> Result<()> {
        self.bucket
            .remove(app_key, channel_type.as_str())
            .await
            .map_err(|e| {
                error!(%app_key, %channel_type, error = %e, "Failed to remove channel");
                e
            })?;

        debug!(%app_key, %channel_type, "Removed channel");
        Ok(())
    }
}
