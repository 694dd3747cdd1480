//! Typed error definitions for fileutils.
//! Provides a small set of well-known failure modes for better logs and tests.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::fs_ops::helpers::build_message;

#[derive(Debug, Error)]
pub enum FileUtilsError {
    /// Open/create/stat/read/write/rename failure. The original `io::Error`
    /// is kept as the source so callers can inspect kind and raw OS code.
    #[error("{}", build_message(.op, .path, .source))]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("source not stable: {}", .path.display())]
    NotStable { path: PathBuf },

    #[error("decode csv '{}': {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Bytes were fully copied but the final sync to stable storage failed.
    #[error("copied to '{}' but durability is not guaranteed: {source}", .path.display())]
    DurabilityNotGuaranteed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FileUtilsError {
    /// Underlying `io::ErrorKind` for I/O-backed variants.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            FileUtilsError::Io { source, .. }
            | FileUtilsError::DurabilityNotGuaranteed { source, .. } => Some(source.kind()),
            FileUtilsError::Csv { source, .. } => match source.kind() {
                csv::ErrorKind::Io(e) => Some(e.kind()),
                _ => None,
            },
            FileUtilsError::NotStable { .. } => None,
        }
    }

    /// Stable numeric code per failure class, for structured logs.
    pub fn code(&self) -> u16 {
        match self {
            FileUtilsError::Io { .. } => 10,
            FileUtilsError::NotStable { .. } => 20,
            FileUtilsError::Csv { .. } => 30,
            FileUtilsError::DurabilityNotGuaranteed { .. } => 40,
        }
    }

    pub fn is_not_stable(&self) -> bool {
        matches!(self, FileUtilsError::NotStable { .. })
    }
}

pub type Result<T> = std::result::Result<T, FileUtilsError>;
