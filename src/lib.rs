//! Core library for `fileutils`.
//!
//! Small, independent filesystem helpers:
//! - listing a directory (flat or recursive) by file-name prefix and suffix,
//! - copying a file once its size has stopped changing,
//! - moving (renaming) a path,
//! - decoding a CSV file with a header row into keyed rows.
//!
//! Every operation is synchronous and returns a typed `FileUtilsError`.

pub mod cli;
pub mod config;
pub mod csv_rows;
pub mod errors;
pub mod fs_ops;
pub mod output;

pub use config::{CopyConfig, LogLevel, StabilityBounds};
pub use csv_rows::{CsvRow, QuoteError, csv_reader_to_rows, csv_to_rows};
pub use errors::{FileUtilsError, Result};
pub use fs_ops::{
    CopyResult, DurabilityMode, StabilityReport, Verdict, copy_file, guarded_copy, is_stable,
    list_files, list_files_recursive, move_path, name_matches, probe_stability,
};

/// Convenience re-exports for callers that want everything in scope.
pub mod prelude {
    pub use crate::config::{CopyConfig, StabilityBounds};
    pub use crate::csv_rows::{CsvRow, csv_to_rows};
    pub use crate::errors::{FileUtilsError as Error, Result as FuResult};
    pub use crate::fs_ops::{
        copy_file, guarded_copy, is_stable, list_files, list_files_recursive, move_path,
    };
}
