//! Environment overrides for the stability bounds.
//!
//! Behavior per variable:
//! - unset or empty -> default
//! - not an integer -> default
//! - outside its range -> default
//!
//! Fallbacks are silent for callers; they are only visible at debug level.

use std::env;

use tracing::debug;

use super::types::{StabilityBounds, within_or_default};
use super::{
    ATTEMPTS_ENV, DEFAULT_ATTEMPTS, DEFAULT_SETTLE_MS, MAX_ATTEMPTS, MAX_SETTLE_MS, MIN_ATTEMPTS,
    MIN_SETTLE_MS, SETTLE_MS_ENV,
};

/// Parse `raw` as an integer and enforce `[min, max]`; anything else yields `def`.
pub fn bounded_int(name: &str, raw: Option<&str>, def: i64, min: i64, max: i64) -> i64 {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return def;
    };
    match raw.parse::<i64>() {
        Ok(n) => within_or_default(name, n, def, min, max),
        Err(e) => {
            debug!(setting = name, raw, error = %e, default = def, "not an integer; using default");
            def
        }
    }
}

impl StabilityBounds {
    /// Resolve bounds from the process environment. Not cached: every call
    /// re-reads the variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve bounds through an arbitrary key lookup (tests inject maps here).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let attempts = bounded_int(
            ATTEMPTS_ENV,
            lookup(ATTEMPTS_ENV).as_deref(),
            DEFAULT_ATTEMPTS as i64,
            MIN_ATTEMPTS as i64,
            MAX_ATTEMPTS as i64,
        );
        let settle_ms = bounded_int(
            SETTLE_MS_ENV,
            lookup(SETTLE_MS_ENV).as_deref(),
            DEFAULT_SETTLE_MS as i64,
            MIN_SETTLE_MS as i64,
            MAX_SETTLE_MS as i64,
        );
        Self::new(attempts, settle_ms)
    }
}
