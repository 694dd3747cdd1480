//! Filesystem operations: modularized.

mod copy;
pub(crate) mod helpers;
mod io_copy;
mod file_move;
mod list;
pub mod probe;

pub use copy::{copy_file, guarded_copy};
pub use file_move::move_path;
pub use helpers::io_error_with_help;
pub use io_copy::{CopyResult, DurabilityMode};
pub use list::{list_files, list_files_recursive, name_matches};
pub use probe::{SizeSample, StabilityReport, Verdict, is_stable, probe_stability};
