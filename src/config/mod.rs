//! Config module.
//! Provides the stability bounds used by guarded copy, their environment
//! resolution, and the log level type shared with the CLI.

pub mod env;
pub mod types;

pub use types::{CopyConfig, LogLevel, StabilityBounds};

/// Environment variable overriding the number of size samples.
pub const ATTEMPTS_ENV: &str = "FILEUTILS_STABLE_ATTEMPTS";
/// Environment variable overriding the settle interval (milliseconds).
pub const SETTLE_MS_ENV: &str = "FILEUTILS_STABLE_SETTLE_MS";

pub const DEFAULT_ATTEMPTS: usize = 5;
pub const MIN_ATTEMPTS: usize = 3;
pub const MAX_ATTEMPTS: usize = 20;

pub const DEFAULT_SETTLE_MS: u64 = 500;
pub const MIN_SETTLE_MS: u64 = 100;
pub const MAX_SETTLE_MS: u64 = 1000;
