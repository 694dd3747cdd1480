//! Streaming byte copy between two open files.
//!
//! Features:
//! - Linux: in-kernel `copy_file_range` when the filesystem supports it.
//! - Everywhere else (or when unsupported): buffered io::copy with 1 MiB buffers.
//! - Returns the byte count; syncing to stable storage is the caller's decision,
//!   so a failed sync can be told apart from a failed copy.
//!
//! Snapshot semantics: the source is read once from its current offset to EOF;
//! bytes appended concurrently may or may not be included.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};

pub(super) const BUF_SIZE: usize = 1024 * 1024; // 1 MiB buffers

/// Durability mode controlling post-write flush behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DurabilityMode {
    /// Ensure written data reaches the OS page cache (`flush`), but do not force
    /// a disk barrier. Fastest; may lose data on sudden power loss.
    Data,
    /// Force data and metadata to stable storage (`sync_all`). Highest integrity.
    Full,
}

/// Result of a streaming copy operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyResult {
    /// Total bytes copied from source to destination.
    pub bytes: u64,
    /// Size of the buffer used for copying.
    pub buf_size: usize,
    /// Durability mode applied.
    pub mode: DurabilityMode,
}

/// Copy everything readable from `src` into `dst` and flush userspace buffers.
pub(super) fn stream_copy(src: &mut File, dst: &mut File) -> io::Result<u64> {
    #[cfg(target_os = "linux")]
    {
        if let Some(bytes) = copy_in_kernel(src, dst)? {
            return Ok(bytes);
        }
    }

    let mut reader = BufReader::with_capacity(BUF_SIZE, src);
    let mut writer = BufWriter::with_capacity(BUF_SIZE, dst);
    let bytes = io::copy(&mut reader, &mut writer)?;
    writer.flush()?;
    Ok(bytes)
}

/// Try `copy_file_range`. Returns Ok(None) when the kernel or filesystem does
/// not support it and nothing was copied yet, so the caller can fall back.
#[cfg(target_os = "linux")]
fn copy_in_kernel(src: &File, dst: &File) -> io::Result<Option<u64>> {
    use std::os::unix::io::AsRawFd;

    let chunk: usize = 16 * 1024 * 1024; // 16 MiB per call
    let mut total: u64 = 0;
    loop {
        let rc = unsafe {
            libc::copy_file_range(
                src.as_raw_fd(),
                std::ptr::null_mut(),
                dst.as_raw_fd(),
                std::ptr::null_mut(),
                chunk,
                0,
            )
        };
        if rc > 0 {
            total += rc as u64;
            continue;
        }
        if rc == 0 {
            return Ok(Some(total));
        }

        let err = io::Error::last_os_error();
        if err.kind() == io::ErrorKind::Interrupted {
            continue;
        }
        let unsupported = matches!(
            err.raw_os_error(),
            Some(code) if code == libc::EXDEV
                || code == libc::ENOSYS
                || code == libc::EINVAL
                || code == libc::EPERM
                || code == libc::EOPNOTSUPP
        );
        // Offsets already moved after a partial copy; falling back would skip bytes.
        if unsupported && total == 0 {
            return Ok(None);
        }
        return Err(err);
    }
}
