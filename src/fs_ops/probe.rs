//! Size stability probe.
//!
//! Samples a path's size up to `attempts` times, sleeping `settle` between
//! samples. Two consecutive equal sizes mean the file stopped growing.
//!
//! Notes:
//! - attempts below 3 are raised to 3 here, whatever the caller validated.
//! - A failed sample (missing, unreadable, not a regular file) ends the probe at once.
//! - No sleep follows the final sample or a short-circuit.

use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;

use tracing::{debug, trace};

use crate::config::MIN_ATTEMPTS;

/// One size observation taken during a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeSample {
    /// Zero-based sample index
    pub index: usize,
    pub size: u64,
}

/// Outcome of a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Two consecutive samples were equal.
    Stable,
    /// Every sample differed from the previous one.
    Changing,
    /// A sample could not be taken or the path is not a regular file.
    Unavailable,
}

/// Ordered samples for one path plus the decision drawn from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StabilityReport {
    pub samples: Vec<SizeSample>,
    pub verdict: Verdict,
}

impl StabilityReport {
    pub fn is_stable(&self) -> bool {
        self.verdict == Verdict::Stable
    }

    /// Number of sampling attempts made, including a failed one.
    pub fn attempts_used(&self) -> usize {
        match self.verdict {
            Verdict::Unavailable => self.samples.len() + 1,
            _ => self.samples.len(),
        }
    }
}

/// Returns true once two consecutive size samples of `path` are equal.
pub fn is_stable(path: &Path, attempts: usize, settle: Duration) -> bool {
    probe_stability(path, attempts, settle).is_stable()
}

/// Probe `path` and return every sample taken together with the verdict.
pub fn probe_stability(path: &Path, attempts: usize, settle: Duration) -> StabilityReport {
    let report = run_probe(attempts, settle, || regular_file_size(path), thread::sleep);
    debug!(
        path = %path.display(),
        verdict = ?report.verdict,
        samples = report.samples.len(),
        "size stability probe finished"
    );
    report
}

/// Size of `path` when it is a regular file (symlinks followed).
fn regular_file_size(path: &Path) -> Option<u64> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => Some(meta.len()),
        Ok(_) => {
            trace!(path = %path.display(), "not a regular file");
            None
        }
        Err(e) => {
            trace!(path = %path.display(), error = %e, "stat failed");
            None
        }
    }
}

/// Probe state machine, independent of the filesystem and the clock.
pub(crate) fn run_probe<S, W>(
    attempts: usize,
    settle: Duration,
    mut sample: S,
    mut wait: W,
) -> StabilityReport
where
    S: FnMut() -> Option<u64>,
    W: FnMut(Duration),
{
    let attempts = attempts.max(MIN_ATTEMPTS);
    let mut samples: Vec<SizeSample> = Vec::with_capacity(attempts);

    for index in 0..attempts {
        let Some(size) = sample() else {
            return StabilityReport {
                samples,
                verdict: Verdict::Unavailable,
            };
        };
        trace!(index, size, "size sample");

        let unchanged = samples.last().is_some_and(|prev| prev.size == size);
        samples.push(SizeSample { index, size });
        if unchanged {
            return StabilityReport {
                samples,
                verdict: Verdict::Stable,
            };
        }

        if index + 1 < attempts {
            wait(settle);
        }
    }

    StabilityReport {
        samples,
        verdict: Verdict::Changing,
    }
}
