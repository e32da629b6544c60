//! End-to-end integration tests for OnePush
//!
//! These tests wire the entity services to a snapshot-backed store and
//! verify that configuration survives a restart.

#[cfg(test)]
mod e2e_tests {
    use onepush_core::{AppEntity, ChannelEntity, ChannelType, FeatureEntity, KeySpace};
    use onepush_service::ConfigServices;
    use onepush_storage::MemoryHashStore;
    use serde_json::json;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_e2e_configuration_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let snapshot = temp_dir.path().join("store.json");
        let keys = KeySpace::default();

        // First process: write one app with a channel and a feature
        {
            let store = Arc::new(MemoryHashStore::open(&snapshot).await.unwrap());
            let services = ConfigServices::new(store.clone(), &keys);

            services
                .apps
                .store(&AppEntity {
                    account: "acc".to_string(),
                    app_key: "A1".to_string(),
                    name: "alerts".to_string(),
                    ..Default::default()
                })
                .await
                .unwrap();
            services
                .channels
                .store(&ChannelEntity {
                    channel_type: ChannelType::DingTalkRobot,
                    app_key: "A1".to_string(),
                    enabled: true,
                    send_token: "tok".to_string(),
                    ..Default::default()
                })
                .await
                .unwrap();

            let mut trim = FeatureEntity {
                app_key: "A1".to_string(),
                channel_type: ChannelType::DingTalkRobot,
                feature_type: "feat:trim-space".to_string(),
                enabled: true,
                ..Default::default()
            };
            trim.attrs.insert("scope".to_string(), json!("title"));
            services.features.store(&trim).await.unwrap();

            store.persist().await.unwrap();
        }

        // Second process: everything is readable again
        let store = Arc::new(MemoryHashStore::open(&snapshot).await.unwrap());
        let services = ConfigServices::new(store, &keys);

        assert_eq!(services.apps.owner("A1").await.unwrap().as_deref(), Some("acc"));
        assert!(services.apps.exists("acc", "A1").await);

        let channels = services.channels.list("A1").await.unwrap();
        assert_eq!(channels[&ChannelType::DingTalkRobot].send_token, "tok");

        let trim = services
            .features
            .load("A1", &ChannelType::DingTalkRobot, "feat:trim-space")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(trim.attrs["scope"], json!("title"));
    }

    #[tokio::test]
    async fn test_e2e_namespaces_are_isolated() {
        let store = Arc::new(MemoryHashStore::new());
        let prod = ConfigServices::new(store.clone(), &KeySpace::default());
        let staging = ConfigServices::new(store, &KeySpace::new("staging::core"));

        prod.apps
            .store(&AppEntity {
                account: "acc".to_string(),
                app_key: "A1".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(prod.apps.exists("acc", "A1").await);
        assert!(!staging.apps.exists("acc", "A1").await);
        assert_eq!(staging.apps.owner("A1").await.unwrap(), None);
    }
}
