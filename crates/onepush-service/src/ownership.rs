//! Ownership index: global app key → account mapping
//!
//! The index lives in a single hash outside every account bucket, so it is
//! written separately from the application record it describes. The two
//! writes are NOT atomic:
//!
//! ```text
//! store:  applications::<account>[app_key] = record   (1)
//!         ownedapps[app_key] = account                (2)
//! remove: delete applications::<account>[app_key]     (1)
//!         delete ownedapps[app_key]                   (2)
//! ```
//!
//! A failure between (1) and (2) leaves a record without an index entry (or an
//! index entry without a record). Nothing repairs this automatically;
//! `ApplicationService::inspect` detects it and `ApplicationService::reconcile`
//! fixes the cases that have an unambiguous repair. Reconciliation is itself a
//! read followed by a write, so a concurrent `store`/`remove` of the same key
//! can race it.
//!
//! An entry whose owner is the empty string counts as missing everywhere.

use onepush_core::{HashStore, KeySpace, Result};
use serde::Serialize;
use std::sync::Arc;

/// Hash name of the index under the key space root.
pub const OWNED_APPS: &str = "ownedapps";

pub struct OwnershipIndex {
    store: Arc<dyn HashStore>,
    hash: String,
}

impl OwnershipIndex {
    pub fn new(store: Arc<dyn HashStore>, keys: &KeySpace) -> Self {
        Self {
            store,
            hash: keys.hash(OWNED_APPS),
        }
    }

    /// Full name of the index hash
    pub fn hash_name(&self) -> &str {
        &self.hash
    }

    /// Point `app_key` at `account`, replacing any previous owner.
    pub async fn record(&self, app_key: &str, account: &str) -> Result<()> {
        self.store.set(&self.hash, app_key, account.to_string()).await
    }

    /// Owning account of `app_key`, if indexed.
    pub async fn owner(&self, app_key: &str) -> Result<Option<String>> {
        let owner = self.store.get(&self.hash, app_key).await?;
        Ok(owner.filter(|account| !account.is_empty()))
    }

    /// Whether `app_key` is indexed to some account. An empty owner is not.
    pub async fn contains(&self, app_key: &str) -> Result<bool> {
        Ok(self.owner(app_key).await?.is_some())
    }

    /// Drop the entry for `app_key`. Missing entries are ignored.
    pub async fn forget(&self, app_key: &str) -> Result<()> {
        self.store.delete(&self.hash, app_key).await
    }
}

/// Agreement between an account's application record and the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Consistency {
    /// Record present and indexed to this account
    Consistent,
    /// Neither a record in this account nor an index entry pointing at it
    Absent,
    /// Record present, index entry missing (interrupted store)
    MissingIndex,
    /// Index points at this account but the record is gone (interrupted remove)
    DanglingIndex,
    /// Record present here, but the index names another account
    ForeignOwner(String),
}

impl Consistency {
    pub fn classify(account: &str, indexed_owner: Option<&str>, has_record: bool) -> Self {
        match (indexed_owner, has_record) {
            (Some(owner), true) if owner == account => Consistency::Consistent,
            (Some(owner), true) => Consistency::ForeignOwner(owner.to_string()),
            (None, true) => Consistency::MissingIndex,
            (Some(owner), false) if owner == account => Consistency::DanglingIndex,
            (_, false) => Consistency::Absent,
        }
    }

    pub fn is_consistent(&self) -> bool {
        matches!(self, Consistency::Consistent | Consistency::Absent)
    }
}
