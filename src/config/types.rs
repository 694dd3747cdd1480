//! Core configuration types.
//! - StabilityBounds holds the probe timing with validated defaults.
//! - CopyConfig bundles the bounds with the durability mode for guarded copy.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use tracing::debug;

use super::{
    DEFAULT_ATTEMPTS, DEFAULT_SETTLE_MS, MAX_ATTEMPTS, MAX_SETTLE_MS, MIN_ATTEMPTS, MIN_SETTLE_MS,
};
use crate::fs_ops::DurabilityMode;

/// Program-defined verbosity levels exposed to users.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Timing used by the size stability probe.
///
/// Each value is validated independently: anything outside its range falls
/// back to the built-in default, never to the nearest bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StabilityBounds {
    /// Number of size samples (3..=20, default 5)
    pub attempts: usize,
    /// Pause between samples (100..=1000 ms, default 500 ms)
    pub settle: Duration,
}

impl Default for StabilityBounds {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_ATTEMPTS,
            settle: Duration::from_millis(DEFAULT_SETTLE_MS),
        }
    }
}

impl StabilityBounds {
    /// Build bounds from caller-supplied values, validating each one.
    pub fn new(attempts: i64, settle_ms: i64) -> Self {
        Self::default().with_attempts(attempts).with_settle_ms(settle_ms)
    }

    /// Replace the attempt count; out-of-range values select the default.
    pub fn with_attempts(mut self, attempts: i64) -> Self {
        self.attempts = within_or_default(
            "attempts",
            attempts,
            DEFAULT_ATTEMPTS as i64,
            MIN_ATTEMPTS as i64,
            MAX_ATTEMPTS as i64,
        ) as usize;
        self
    }

    /// Replace the settle interval; out-of-range values select the default.
    pub fn with_settle_ms(mut self, settle_ms: i64) -> Self {
        let ms = within_or_default(
            "settle_ms",
            settle_ms,
            DEFAULT_SETTLE_MS as i64,
            MIN_SETTLE_MS as i64,
            MAX_SETTLE_MS as i64,
        );
        self.settle = Duration::from_millis(ms as u64);
        self
    }

    /// Upper bound on the time a probe may block: attempts x settle.
    pub fn worst_case(&self) -> Duration {
        self.settle * self.attempts as u32
    }
}

pub(crate) fn within_or_default(name: &str, value: i64, def: i64, min: i64, max: i64) -> i64 {
    if (min..=max).contains(&value) {
        value
    } else {
        debug!(setting = name, value, min, max, default = def, "value out of range; using default");
        def
    }
}

/// Settings for one guarded copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyConfig {
    pub bounds: StabilityBounds,
    /// Full = flush + sync_all (default); Data = flush to the OS only
    pub durability: DurabilityMode,
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            bounds: StabilityBounds::default(),
            durability: DurabilityMode::Full,
        }
    }
}

impl CopyConfig {
    pub fn new(bounds: StabilityBounds) -> Self {
        Self {
            bounds,
            ..Default::default()
        }
    }

    /// Read the bounds from the process environment; durability stays Full.
    pub fn from_env() -> Self {
        Self::new(StabilityBounds::from_env())
    }
}
