//! Bucket key construction
//!
//! Every bucket lives under a key space root (`onepush::core` by default):
//!
//! ```text
//! onepush::core::applications::<account>             field = app key
//! onepush::core::channels::<app key>                 field = channel type
//! onepush::core::features::<app key>#<channel type>  field = feature type
//! onepush::core::ownedapps                           field = app key, value = account
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{ChannelType, Error, Result};

/// Default root shared by all OnePush buckets.
pub const DEFAULT_ROOT: &str = "onepush::core";

/// Separator between the app key and channel type in a feature owner token.
pub const OWNER_SEPARATOR: char = '#';

/// Root namespace under which bucket names are derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeySpace {
    root: String,
}

impl KeySpace {
    pub fn new(root: impl Into<String>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// Prefix for per-owner buckets of one entity kind. The owner token is
    /// appended as-is.
    pub fn bucket_prefix(&self, segment: &str) -> String {
        format!("{}::{}::", self.root, segment)
    }

    /// Name of a single global hash under this root.
    pub fn hash(&self, name: &str) -> String {
        format!("{}::{}", self.root, name)
    }
}

impl Default for KeySpace {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT)
    }
}

/// Composite owner of a feature bucket: one channel of one application.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeatureOwner {
    app_key: String,
    channel_type: ChannelType,
}

impl FeatureOwner {
    pub fn new(app_key: impl Into<String>, channel_type: impl Into<ChannelType>) -> Self {
        Self {
            app_key: app_key.into(),
            channel_type: channel_type.into(),
        }
    }

    pub fn app_key(&self) -> &str {
        &self.app_key
    }

    pub fn channel_type(&self) -> &ChannelType {
        &self.channel_type
    }

    /// Flatten into the `appKey#channelType` owner token.
    ///
    /// The separator is reserved: a component containing it would let two
    /// distinct owners share a bucket, so such owners are rejected instead of
    /// escaped.
    pub fn token(&self) -> Result<String> {
        reject_separator("app key", &self.app_key)?;
        reject_separator("channel type", self.channel_type.as_str())?;
        Ok(format!(
            "{}{}{}",
            self.app_key,
            OWNER_SEPARATOR,
            self.channel_type.as_str()
        ))
    }
}

impl fmt::Display for FeatureOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.app_key, OWNER_SEPARATOR, self.channel_type)
    }
}

impl FromStr for FeatureOwner {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (app_key, channel_type) = s.split_once(OWNER_SEPARATOR).ok_or_else(|| {
            Error::InvalidKey(format!("feature owner '{}' has no '{}'", s, OWNER_SEPARATOR))
        })?;
        reject_separator("channel type", channel_type)?;
        Ok(Self::new(app_key, channel_type))
    }
}

fn reject_separator(component: &str, value: &str) -> Result<()> {
    if value.contains(OWNER_SEPARATOR) {
        return Err(Error::InvalidKey(format!(
            "{} '{}' contains reserved separator '{}'",
            component, value, OWNER_SEPARATOR
        )));
    }
    Ok(())
}
