//! Entity services for OnePush configuration
//!
//! Each service binds the generic bucket store to one entity kind:
//!
//! | Service | Bucket owner | Field key |
//! |---|---|---|
//! | `ApplicationService` | account | app key |
//! | `ChannelService` | app key | channel type |
//! | `FeatureService` | `appKey#channelType` | feature type |
//!
//! `ApplicationService` additionally maintains the global ownership index
//! (app key → account) next to each primary record.
//!
//! # Example
//! ```no_run
//! # use std::sync::Arc;
//! # use onepush_core::{AppEntity, KeySpace};
//! # use onepush_service::ConfigServices;
//! # use onepush_storage::MemoryHashStore;
//! # async fn example() -> onepush_core::Result<()> {
//! let services = ConfigServices::new(Arc::new(MemoryHashStore::new()), &KeySpace::default());
//! let app = AppEntity {
//!     account: "acc".to_string(),
//!     app_key: "k1".to_string(),
//!     ..Default::default()
//! };
//! services.apps.store(&app).await?;
//! assert_eq!(services.apps.owner("k1").await?.as_deref(), Some("acc"));
//! # Ok(())
//! # }
//! ```

mod application;
mod channel;
mod feature;
mod ownership;

#[cfg(test)]
mod test_support;

pub use application::{AppBucket, ApplicationService};
pub use channel::{ChannelBucket, ChannelService};
pub use feature::{FeatureBucket, FeatureService};
pub use ownership::{Consistency, OWNED_APPS, OwnershipIndex};

use onepush_core::{HashStore, KeySpace};
use std::sync::Arc;

/// All entity services sharing one backing store.
pub struct ConfigServices {
    pub apps: ApplicationService,
    pub channels: ChannelService,
    pub features: FeatureService,
}

impl ConfigServices {
    pub fn new(store: Arc<dyn HashStore>, keys: &KeySpace) -> Self {
        Self {
            apps: ApplicationService::new(store.clone(), keys),
            channels: ChannelService::new(store.clone(), keys),
            features: FeatureService::new(store, keys),
        }
    }
}
