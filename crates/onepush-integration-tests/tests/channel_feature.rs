//! Channel and feature scenarios for one application

mod common;

use common::FlakyStore;
use onepush_core::{ChannelEntity, ChannelType, Error, FeatureEntity, KeySpace};
use onepush_service::ConfigServices;
use serde_json::json;
use std::sync::Arc;

fn services() -> ConfigServices {
    ConfigServices::new(Arc::new(FlakyStore::new()), &KeySpace::default())
}

fn trim_space(app_key: &str) -> FeatureEntity {
    FeatureEntity {
        app_key: app_key.to_string(),
        channel_type: ChannelType::DingTalkRobot,
        feature_type: "feat:trim-space".to_string(),
        enabled: true,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_channel_listed_by_type() {
    let services = services();

    let channel: ChannelEntity = serde_json::from_value(json!({
        "type": "dingtalk-robot",
        "app_key": "A1",
        "enabled": true
    }))
    .unwrap();
    services.channels.store(&channel).await.unwrap();

    let channels = services.channels.list("A1").await.unwrap();
    let robot = channels
        .get(&ChannelType::from("dingtalk-robot"))
        .expect("dingtalk-robot listed");
    assert!(robot.enabled);
}

#[tokio::test]
async fn test_feature_scoped_to_channel() {
    let services = services();

    services.features.store(&trim_space("A1")).await.unwrap();

    assert_eq!(
        services
            .features
            .load("A1", &ChannelType::DingTalkRobot, "feat:trim-space")
            .await
            .unwrap(),
        Some(trim_space("A1"))
    );
    assert_eq!(
        services
            .features
            .load("A1", &ChannelType::from("other-channel"), "feat:trim-space")
            .await
            .unwrap(),
        None
    );
    assert_eq!(
        services
            .features
            .load("A2", &ChannelType::DingTalkRobot, "feat:trim-space")
            .await
            .unwrap(),
        None
    );
}

#[tokio::test]
async fn test_feature_json_uses_wire_names() {
    let services = services();

    let feature: FeatureEntity = serde_json::from_value(json!({
        "app_key": "A1",
        "channel_type": "dingtalk-robot",
        "type": "feat:trim-space",
        "enabled": true,
        "attrs": null,
        "options": {"mode": "both"}
    }))
    .unwrap();
    services.features.store(&feature).await.unwrap();

    let listed = services
        .features
        .list("A1", &ChannelType::DingTalkRobot)
        .await
        .unwrap();
    let loaded = &listed["feat:trim-space"];
    assert!(loaded.attrs.is_empty());
    assert_eq!(loaded.options["mode"], json!("both"));
}

#[tokio::test]
async fn test_removing_channel_keeps_features() {
    let services = services();

    services
        .channels
        .store(&ChannelEntity {
            channel_type: ChannelType::DingTalkRobot,
            app_key: "A1".to_string(),
            enabled: true,
            ..Default::default()
        })
        .await
        .unwrap();
    services.features.store(&trim_space("A1")).await.unwrap();

    services
        .channels
        .remove("A1", &ChannelType::DingTalkRobot)
        .await
        .unwrap();

    assert!(
        services
            .features
            .exists("A1", &ChannelType::DingTalkRobot, "feat:trim-space")
            .await
    );
}

#[tokio::test]
async fn test_reserved_separator_rejected() {
    let services = services();

    let err = services
        .features
        .store(&trim_space("A1#evil"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidKey(_)));
}
