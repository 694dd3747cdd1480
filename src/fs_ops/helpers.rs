//! I/O helper utilities.
//!
//! Provides a small adapter that wraps io::Error into `FileUtilsError::Io`
//! together with the operation and path, and renders an actionable message
//! with platform-aware hints.
//!
//! Usage:
//!   File::open(p).map_err(io_error_with_help("open source file", p))?;

use std::io;
use std::path::Path;

use crate::errors::FileUtilsError;

/// Format a human-friendly message with op/path plus platform-aware hints.
pub(crate) fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);

    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            match code {
                libc::EACCES | libc::EPERM => {
                    msg.push_str(" - permission denied; check ownership and permissions.");
                }
                libc::EXDEV => {
                    msg.push_str(" - cross-filesystem; rename cannot cross devices.");
                }
                libc::EBUSY => {
                    msg.push_str(" - resource busy; ensure no other process is writing.");
                }
                libc::ENOENT => {
                    msg.push_str(" - path not found; verify it exists.");
                }
                libc::EEXIST => {
                    msg.push_str(" - already exists; pick a unique name or remove the target.");
                }
                libc::EISDIR => {
                    msg.push_str(" - is a directory; a regular file was expected.");
                }
                libc::ENOTDIR => {
                    msg.push_str(" - not a directory; check the path components.");
                }
                libc::ENOSPC => {
                    msg.push_str(" - insufficient space on device.");
                }
                libc::EROFS => {
                    msg.push_str(" - read-only filesystem; cannot write here.");
                }
                libc::ELOOP => {
                    msg.push_str(" - too many symbolic link levels; possible symlink cycle.");
                }
                libc::ENAMETOOLONG => {
                    msg.push_str(" - filename or path too long; shorten path segments.");
                }
                libc::EMFILE => {
                    msg.push_str(" - process file descriptor limit reached; close files or raise limits.");
                }
                libc::ENFILE => {
                    msg.push_str(" - system-wide file table overflow; reduce open files.");
                }
                _ => {}
            }
        }
        #[cfg(windows)]
        {
            match code {
                5 => msg.push_str(" - access denied; check permissions."), // ERROR_ACCESS_DENIED
                17 => msg.push_str(" - not same device; rename cannot cross devices."), // ERROR_NOT_SAME_DEVICE
                32 => msg.push_str(" - sharing violation; file is in use."), // ERROR_SHARING_VIOLATION
                2 | 3 => msg.push_str(" - path not found; verify it exists."),
                80 => msg.push_str(" - already exists; pick a unique name."), // ERROR_FILE_EXISTS
                112 => msg.push_str(" - insufficient disk space."), // ERROR_DISK_FULL
                19 => msg.push_str(" - write protected / read-only media."), // ERROR_WRITE_PROTECT
                206 => msg.push_str(" - filename or path too long."), // ERROR_FILENAME_EXCED_RANGE
                _ => {}
            }
        }
        msg.push_str(&format!(" [os code: {}]", code));
    } else {
        // Synthetic errors carry no OS code; fall back to kind-based hints.
        match e.kind() {
            io::ErrorKind::PermissionDenied => {
                msg.push_str(" - permission denied; check ownership and permissions.");
            }
            io::ErrorKind::NotFound => {
                msg.push_str(" - path not found; verify it exists.");
            }
            io::ErrorKind::AlreadyExists => {
                msg.push_str(" - already exists; remove or choose a unique name.");
            }
            io::ErrorKind::UnexpectedEof => {
                msg.push_str(" - unexpected end of file; source may have been truncated.");
            }
            _ => {}
        }
    }

    msg
}

/// Returns a closure suitable for `.map_err(...)` that converts
/// io::Error -> FileUtilsError::Io, keeping the original error as source.
pub fn io_error_with_help<'a>(
    op: &'static str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> FileUtilsError + 'a {
    move |source: io::Error| FileUtilsError::Io {
        op,
        path: path.to_path_buf(),
        source,
    }
}

/// Detect EXDEV / ERROR_NOT_SAME_DEVICE; std has no stable ErrorKind for it.
pub(crate) fn is_cross_device(e: &io::Error) -> bool {
    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            if code == libc::EXDEV {
                return true;
            }
        }
        #[cfg(windows)]
        {
            if code == 17 {
                return true;
            }
        }
    }
    false
}
