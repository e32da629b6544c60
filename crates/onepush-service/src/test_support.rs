//! Shared fixtures for service unit tests

use async_trait::async_trait;
use mockall::mock;
use onepush_core::{AppEntity, ChannelEntity, ChannelType, Error, FeatureEntity, HashStore, Result};
use std::collections::HashMap;

mock! {
    pub Backend {}

    #[async_trait]
    impl HashStore for Backend {
        async fn get_all(&self, bucket: &str) -> Result<HashMap<String, String>>;
        async fn get(&self, bucket: &str, field: &str) -> Result<Option<String>>;
        async fn set(&self, bucket: &str, field: &str, value: String) -> Result<()>;
        async fn delete(&self, bucket: &str, field: &str) -> Result<()>;
        async fn exists(&self, bucket: &str, field: &str) -> Result<bool>;
    }
}

pub fn unavailable() -> Error {
    Error::unavailable("connection refused")
}

pub fn app(account: &str, app_key: &str) -> AppEntity {
    AppEntity {
        account: account.to_string(),
        app_key: app_key.to_string(),
        name: format!("{} app", app_key),
        ..Default::default()
    }
}

pub fn channel(app_key: &str, channel_type: ChannelType) -> ChannelEntity {
    ChannelEntity {
        channel_type,
        app_key: app_key.to_string(),
        enabled: true,
        send_token: "token".to_string(),
        ..Default::default()
    }
}

pub fn feature(app_key: &str, channel_type: ChannelType, feature_type: &str) -> FeatureEntity {
    FeatureEntity {
        app_key: app_key.to_string(),
        channel_type,
        feature_type: feature_type.to_string(),
        enabled: true,
        ..Default::default()
    }
}
