//! OnePush Storage
//!
//! This crate provides the storage building blocks the entity services sit on:
//! - Generic typed bucket store over any `HashStore`
//! - JSON value codec
//! - In-memory hash store with JSON snapshots
//! - Store configuration (file + environment)

pub mod bucket;
pub mod codec;
pub mod config;
pub mod memory;
pub mod snapshot;

pub use bucket::{BucketSpec, BucketStore};
pub use codec::JsonCodec;
pub use config::StoreConfig;
pub use memory::MemoryHashStore;
