//! OnePush Core Types and Traits
//!
//! This crate provides the fundamental types and traits used throughout OnePush:
//! - Application, Channel and Feature entities
//! - Bucket key construction and composite owner keys
//! - Hash store and codec abstractions
//! - Core error types

pub mod codec;
pub mod entity;
pub mod error;
pub mod hash_store;
pub mod keygen;
pub mod keys;
pub mod presence;

pub use codec::{Codec, CodecError};
pub use entity::{AppEntity, ChannelEntity, ChannelType, FeatureEntity, Message};
pub use error::{Error, Result};
pub use hash_store::HashStore;
pub use keys::{FeatureOwner, KeySpace};
pub use presence::Presence;
