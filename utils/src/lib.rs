//! Shared utilities for ballotbox binaries.

pub mod logging;

pub use logging::{init_logging, LogFormat};
