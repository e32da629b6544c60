//! Feature service

use onepush_core::{
    ChannelType, FeatureEntity, FeatureOwner, HashStore, KeySpace, Presence, Result,
};
use onepush_storage::{BucketSpec, BucketStore};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error};

/// Features are bucketed per (application, channel) and keyed by feature type.
pub struct FeatureBucket;

impl BucketSpec for FeatureBucket {
    type Value = FeatureEntity;
    type Owner = FeatureOwner;
    const SEGMENT: &'static str = "features";

    fn owner_token(owner: &FeatureOwner) -> Result<String> {
        owner.token()
    }
}

/// Feature toggles and options for one channel of one application.
///
/// Owners whose app key or channel type contains `#` are rejected with
/// `Error::InvalidKey` before the store is touched.
pub struct FeatureService {
    bucket: BucketStore<FeatureBucket>,
}

impl FeatureService {
    pub fn new(store: Arc<dyn HashStore>, keys: &KeySpace) -> Self {
        Self {
            bucket: BucketStore::new(store, keys),
        }
    }

    pub async fn list(
        &self,
        app_key: &str,
        channel_type: &ChannelType,
    ) -> Result<HashMap<String, FeatureEntity>> {
        let owner = FeatureOwner::new(app_key, channel_type.clone());
        self.bucket.list(&owner).await.map_err(|e| {
            error!(%app_key, %channel_type, error = %e, "Failed to list features");
            e
        })
    }

    /// Write a feature under its own `app_key`, `channel_type` and `feature_type`.
    pub async fn store(&self, feature: &FeatureEntity) -> Result<()> {
        let owner = FeatureOwner::new(feature.app_key.as_str(), feature.channel_type.clone());
        let feature_type = feature.feature_type.as_str();

        self.bucket
            .store(&owner, feature_type, feature)
            .await
            .map_err(|e| {
                error!(
                    app_key = %owner.app_key(),
                    channel_type = %owner.channel_type(),
                    %feature_type,
                    error = %e,
                    "Failed to store feature"
                );
                e
            })?;

        debug!(
            app_key = %owner.app_key(),
            channel_type = %owner.channel_type(),
            %feature_type,
            "Stored feature"
        );
        Ok(())
    }

    pub async fn load(
        &self,
        app_key: &str,
        channel_type: &ChannelType,
        feature_type: &str,
    ) -> Result<Option<FeatureEntity>> {
        let owner = FeatureOwner::new(app_key, channel_type.clone());
        self.bucket.load(&owner, feature_type).await.map_err(|e| {
            error!(%app_key, %channel_type, %feature_type, error = %e, "Failed to load feature");
            e
        })
    }

    pub async fn presence(
        &self,
        app_key: &str,
        channel_type: &ChannelType,
        feature_type: &str,
    ) -> Result<Presence> {
        let owner = FeatureOwner::new(app_key, channel_type.clone());
        Ok(self.bucket.exists(&owner, feature_type).await?.into())
    }

    /// Boolean form of [`presence`](Self::presence); errors are logged and read as `false`.
    pub async fn exists(&self, app_key: &str, channel_type: &ChannelType, feature_type: &str) -> bool {
        match self.presence(app_key, channel_type, feature_type).await {
            Ok(presence) => presence.is_present(),
            Err(e) => {
                error!(
                    %app_key,
                    %channel_type,
                    %feature_type,
                    error = %e,
                    "Failed to check feature existence"
                );
                false
            }
        }
    }

    pub async fn remove(
        &self,
        app_key: &str,
        channel_type: &ChannelType,
        feature_type: &str,
    ) -> Result<()> {
        let owner = FeatureOwner::new(app_key, channel_type.clone());
        self.bucket.remove(&owner, feature_type).await.map_err(|e| {
            error!(%app_key, %channel_type, %feature_type, error = %e, "Failed to remove feature");
            e
        })?;

        debug!(%app_key, %channel_type, %feature_type, "Removed feature");
        Ok(())
    }
}
