//! Guarded copy:
//! - Waits until the source size stops changing (probe::probe_stability)
//! - Opens the source, creates/truncates the destination in place
//! - Streams the bytes (io_copy::stream_copy)
//! - Syncs the destination to stable storage (DurabilityMode::Full)
//!
//! A source that never settles leaves the destination untouched. A failure
//! during streaming leaves a partially written destination behind.

use std::fs::File;
use std::path::Path;

use tracing::{info, warn};

use super::helpers::io_error_with_help;
use super::io_copy::{self, BUF_SIZE, CopyResult, DurabilityMode};
use super::probe::probe_stability;
use crate::config::CopyConfig;
use crate::errors::{FileUtilsError, Result};

/// Copy `src` to `dst` once `src` is observed stable, using bounds read from
/// the environment for this call.
pub fn copy_file(src: &Path, dst: &Path) -> Result<CopyResult> {
    guarded_copy(src, dst, &CopyConfig::from_env())
}

/// Copy `src` to `dst` once `src` is observed stable under `config.bounds`.
pub fn guarded_copy(src: &Path, dst: &Path, config: &CopyConfig) -> Result<CopyResult> {
    let bounds = &config.bounds;
    let report = probe_stability(src, bounds.attempts, bounds.settle);
    if !report.is_stable() {
        warn!(
            src = %src.display(),
            verdict = ?report.verdict,
            attempts = report.attempts_used(),
            "source not stable; copy skipped"
        );
        return Err(FileUtilsError::NotStable {
            path: src.to_path_buf(),
        });
    }

    let mut src_f = File::open(src).map_err(io_error_with_help("open source file", src))?;
    let mut dst_f =
        File::create(dst).map_err(io_error_with_help("create destination file", dst))?;

    let bytes = io_copy::stream_copy(&mut src_f, &mut dst_f)
        .map_err(io_error_with_help("copy into destination", dst))?;

    if config.durability == DurabilityMode::Full {
        dst_f
            .sync_all()
            .map_err(|source| FileUtilsError::DurabilityNotGuaranteed {
                path: dst.to_path_buf(),
                source,
            })?;
    }

    info!(src = %src.display(), dst = %dst.display(), bytes, "Copied file");
    Ok(CopyResult {
        bytes,
        buf_size: BUF_SIZE,
        mode: config.durability,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StabilityBounds;
    use std::fs;
    use std::time::Duration;
    use tempfile::tempdir;

    fn fast() -> CopyConfig {
        CopyConfig::new(StabilityBounds {
            attempts: 3,
            settle: Duration::from_millis(5),
        })
    }

    #[test]
    fn copies_and_reports_bytes() {
        let td = tempdir().unwrap();
        let src = td.path().join("a.txt");
        let dst = td.path().join("b.txt");
        fs::write(&src, b"twelve bytes").unwrap();

        let res = guarded_copy(&src, &dst, &fast()).unwrap();
        assert_eq!(res.bytes, 12);
        assert_eq!(res.mode, DurabilityMode::Full);
        assert_eq!(fs::read(&dst).unwrap(), b"twelve bytes");
    }

    #[test]
    fn data_mode_skips_sync_but_copies() {
        let td = tempdir().unwrap();
        let src = td.path().join("a");
        let dst = td.path().join("b");
        fs::write(&src, b"abc").unwrap();

        let mut cfg = fast();
        cfg.durability = DurabilityMode::Data;
        let res = guarded_copy(&src, &dst, &cfg).unwrap();
        assert_eq!(res.mode, DurabilityMode::Data);
        assert_eq!(fs::read(&dst).unwrap(), b"abc");
    }

    #[test]
    fn destination_directory_missing_is_io_error() {
        let td = tempdir().unwrap();
        let src = td.path().join("a");
        fs::write(&src, b"abc").unwrap();
        let dst = td.path().join("missing").join("b");

        let err = guarded_copy(&src, &dst, &fast()).unwrap_err();
        assert_eq!(err.io_kind(), Some(std::io::ErrorKind::NotFound));
        assert!(err.to_string().contains("create destination file"));
    }
}
