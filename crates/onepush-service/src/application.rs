//! Application service

use onepush_core::{AppEntity, HashStore, KeySpace, Presence, Result};
use onepush_storage::{BucketSpec, BucketStore};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::ownership::{Consistency, OwnershipIndex};

/// Applications are bucketed per account and keyed by app key.
pub struct AppBucket;

impl BucketSpec for AppBucket {
    type Value = AppEntity;
    type Owner = str;
    const SEGMENT: &'static str = "applications";

    fn owner_token(account: &str) -> Result<String> {
        Ok(account.to_string())
    }
}

/// Application CRUD plus maintenance of the ownership index.
///
/// `store` and `remove` are two-step writes (primary record, then index) with
/// no rollback; see [`crate::ownership`] for the failure states this can leave.
pub struct ApplicationService {
    bucket: BucketStore<AppBucket>,
    index: OwnershipIndex,
}

impl ApplicationService {
    pub fn new(store: Arc<dyn HashStore>, keys: &KeySpace) -> Self {
        Self {
            bucket: BucketStore::new(store.clone(), keys),
            index: OwnershipIndex::new(store, keys),
        }
    }

    /// Applications owned by `account`. The index is not consulted.
    pub async fn list(&self, account: &str) -> Result<HashMap<String, AppEntity>> {
        self.bucket.list(account).await.map_err(|e| {
            error!(%account, error = %e, "Failed to list applications");
            e
        })
    }

    /// Write the application record, then index its owner.
    ///
    /// # Errors
    /// Returns the error of whichever step failed. If the index write fails
    /// the record has already been written and is not rolled back.
    pub async fn store(&self, app: &AppEntity) -> Result<()> {
        let (account, app_key) = (app.account.as_str(), app.app_key.as_str());

        self.bucket.store(account, app_key, app).await.map_err(|e| {
            error!(%account, %app_key, error = %e, "Failed to store application");
            e
        })?;

        self.index.record(app_key, account).await.map_err(|e| {
            error!(
                %account,
                %app_key,
                error = %e,
                "Failed to index application owner; record stored without index entry"
            );
            e
        })?;

        debug!(%account, %app_key, "Stored application");
        Ok(())
    }

    pub async fn load(&self, account: &str, app_key: &str) -> Result<Option<AppEntity>> {
        self.bucket.load(account, app_key).await.map_err(|e| {
            error!(%account, %app_key, error = %e, "Failed to load application");
            e
        })
    }

    /// Present only when both the index entry and the account's record exist.
    /// An index entry with an empty owner does not count.
    pub async fn presence(&self, account: &str, app_key: &str) -> Result<Presence> {
        if !self.index.contains(app_key).await? {
            return Ok(Presence::Absent);
        }
        Ok(self.bucket.exists(account, app_key).await?.into())
    }

    /// Boolean form of [`presence`](Self::presence); store failures read as
    /// `false` and are only logged.
    pub async fn exists(&self, account: &str, app_key: &str) -> bool {
        match self.presence(account, app_key).await {
            Ok(presence) => presence.is_present(),
            Err(e) => {
                error!(%account, %app_key, error = %e, "Failed to check application existence");
                false
            }
        }
    }

    /// Delete the application record, then its index entry.
    ///
    /// # Errors
    /// Returns the error of whichever step failed. If the index delete fails
    /// the record is already gone and `owner` keeps answering for it.
    pub async fn remove(&self, account: &str, app_key: &str) -> Result<()> {
        self.bucket.remove(account, app_key).await.map_err(|e| {
            error!(%account, %app_key, error = %e, "Failed to remove application");
            e
        })?;

        self.index.forget(app_key).await.map_err(|e| {
            error!(
                %account,
                %app_key,
                error = %e,
                "Failed to drop application owner; index entry left without record"
            );
            e
        })?;

        debug!(%account, %app_key, "Removed application");
        Ok(())
    }

    /// Account recorded in the index for `app_key`.
    ///
    /// Reads the index only: a `Some` result does not prove the application
    /// record still exists.
    pub async fn owner(&self, app_key: &str) -> Result<Option<String>> {
        self.index.owner(app_key).await.map_err(|e| {
            error!(%app_key, error = %e, "Failed to look up application owner");
            e
        })
    }

    /// Compare the account's record with the index entry for `app_key`.
    pub async fn inspect(&self, account: &str, app_key: &str) -> Result<Consistency> {
        let owner = self.index.owner(app_key).await?;
        let has_record = self.bucket.exists(account, app_key).await?;
        Ok(Consistency::classify(account, owner.as_deref(), has_record))
    }

    /// Repair a half-finished dual write for one application.
    ///
    /// `MissingIndex` gets its index entry written and `DanglingIndex` gets its
    /// entry dropped. `ForeignOwner` is reported but left alone, since either
    /// account could be the rightful owner. Returns the state found before any
    /// repair.
    ///
    /// The inspection and the repair write are separate round trips with no
    /// lock between them. A `store` or `remove` for the same app key that lands
    /// in between can be undone: a `DanglingIndex` repair racing a fresh `store`
    /// deletes the new index entry. Run it while writers for `app_key` are
    /// quiet, or call it again afterwards.
    pub async fn reconcile(&self, account: &str, app_key: &str) -> Result<Consistency> {
        let state = self.inspect(account, app_key).await?;
        match &state {
            Consistency::MissingIndex => {
                self.index.record(app_key, account).await?;
                info!(%account, %app_key, "Restored missing ownership index entry");
            }
            Consistency::DanglingIndex => {
                self.index.forget(app_key).await?;
                info!(%account, %app_key, "Dropped dangling ownership index entry");
            }
            Consistency::ForeignOwner(owner) => {
                warn!(
                    %account,
                    %app_key,
                    indexed_owner = %owner,
                    "Application record conflicts with ownership index; not repaired"
                );
            }
            Consistency::Consistent | Consistency::Absent => {}
        }
        Ok(state)
    }
}
