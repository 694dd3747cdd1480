//! Move (rename) a path.
//! A plain rename on the same filesystem; there is no copy+delete fallback,
//! so cross-device moves fail with the OS error preserved.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use super::helpers::{io_error_with_help, is_cross_device};
use crate::errors::Result;

/// Rename `src` to `dst`, replacing `dst` where the platform allows it.
pub fn move_path(src: &Path, dst: &Path) -> Result<()> {
    if let Err(e) = fs::rename(src, dst) {
        if is_cross_device(&e) {
            debug!(
                src = %src.display(),
                dst = %dst.display(),
                "rename crosses filesystems; copy the file and remove the source instead"
            );
        }
        return Err(io_error_with_help("rename source", src)(e));
    }
    info!(src = %src.display(), dst = %dst.display(), "Renamed path");
    Ok(())
}
