//! Shared helpers for the binary and embedders.

pub mod logging;

pub use logging::{init_from_env, init_logging, LoggingConfig};
