//! OnePush Observability
//!
//! Structured logging setup shared by OnePush binaries. Library crates only
//! emit `tracing` events; installing a subscriber is left to the process.

pub mod logging;

pub use logging::{LoggingConfig, init_logging};
