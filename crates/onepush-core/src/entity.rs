//! Stored configuration entities
//!
//! Field names on the wire are fixed: records written by other OnePush
//! components must round-trip through these types unchanged.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Free-form attribute bag attached to entities.
pub type Attrs = HashMap<String, serde_json::Value>;

/// An application registered under an account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppEntity {
    /// Owning account
    pub account: String,

    /// Globally unique application key
    pub app_key: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub attrs: Attrs,
}

/// Delivery channel configuration for one application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelEntity {
    #[serde(rename = "type")]
    pub channel_type: ChannelType,

    /// Application the channel belongs to
    pub app_key: String,

    #[serde(default)]
    pub enabled: bool,

    /// Access token used when sending through this channel
    #[serde(default)]
    pub send_token: String,

    /// Signing secret used when sending through this channel
    #[serde(default)]
    pub send_secret: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub attrs: Attrs,
}

/// A feature toggle scoped to one channel of one application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureEntity {
    pub app_key: String,

    pub channel_type: ChannelType,

    /// Feature identifier, e.g. `feat:trim-space`
    #[serde(rename = "type")]
    pub feature_type: String,

    #[serde(default)]
    pub enabled: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub attrs: Attrs,

    #[serde(default, deserialize_with = "null_as_default")]
    pub options: Attrs,
}

/// Outbound notification payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub app_key: String,

    /// Formatter applied to `content` before delivery
    #[serde(default)]
    pub format: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub content: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub args: HashMap<String, String>,
}

/// Known delivery channel kinds.
///
/// Unrecognised kinds are carried verbatim in `Other` so that records written
/// by newer producers still load.
///
/// Equality and hashing go through [`as_str`](Self::as_str): `Other` holding a
/// known kind's name is the same channel type as that kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChannelType {
    DingTalkApp,
    DingTalkRobot,
    WechatWorkRobot,
    WechatWorkApp,
    FeishuApp,
    FeishuRobot,
    Other(String),
}

impl ChannelType {
    pub const KNOWN: [ChannelType; 6] = [
        ChannelType::DingTalkApp,
        ChannelType::DingTalkRobot,
        ChannelType::WechatWorkRobot,
        ChannelType::WechatWorkApp,
        ChannelType::FeishuApp,
        ChannelType::FeishuRobot,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ChannelType::DingTalkApp => "dingtalk-app",
            ChannelType::DingTalkRobot => "dingtalk-robot",
            ChannelType::WechatWorkRobot => "wechatwork-robot",
            ChannelType::WechatWorkApp => "wechatwork-app",
            ChannelType::FeishuApp => "feishu-app",
            ChannelType::FeishuRobot => "feishu-robot",
            ChannelType::Other(other) => other,
        }
    }

    /// Check if this is one of the built-in channel kinds
    pub fn is_known(&self) -> bool {
        !matches!(self, ChannelType::Other(_))
    }
}

impl PartialEq for ChannelType {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for ChannelType {}

impl Hash for ChannelType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl Default for ChannelType {
    fn default() -> Self {
        ChannelType::Other(String::new())
    }
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ChannelType {
    fn from(value: &str) -> Self {
        match value {
            "dingtalk-app" => ChannelType::DingTalkApp,
            "dingtalk-robot" => ChannelType::DingTalkRobot,
            "wechatwork-robot" => ChannelType::WechatWorkRobot,
            "wechatwork-app" => ChannelType::WechatWorkApp,
            "feishu-app" => ChannelType::FeishuApp,
            "feishu-robot" => ChannelType::FeishuRobot,
            other => ChannelType::Other(other.to_string()),
        }
    }
}

impl From<String> for ChannelType {
    fn from(value: String) -> Self {
        match ChannelType::from(value.as_str()) {
            ChannelType::Other(_) => ChannelType::Other(value),
            known => known,
        }
    }
}

impl From<ChannelType> for String {
    fn from(value: ChannelType) -> Self {
        match value {
            ChannelType::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

/// Older producers write `null` for empty maps.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
