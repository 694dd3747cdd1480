//! Directory listing filtered by file-name prefix and suffix.
//! Both the flat and the recursive variant share `name_matches`; files and
//! directories are matched alike.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use super::helpers::io_error_with_help;
use crate::errors::{FileUtilsError, Result};

/// True when `name` starts with `prefix` and ends with `suffix`.
/// Empty strings match everything.
#[inline]
pub fn name_matches(name: &str, prefix: &str, suffix: &str) -> bool {
    name.starts_with(prefix) && name.ends_with(suffix)
}

/// Names of the immediate children of `dir` matching the filter, sorted by name.
pub fn list_files(dir: &Path, prefix: &str, suffix: &str) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir).map_err(io_error_with_help("read directory", dir))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(io_error_with_help("read directory entry", dir))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name_matches(&name, prefix, suffix) {
            names.push(name);
        }
    }
    names.sort();
    debug!(dir = %dir.display(), prefix, suffix, matches = names.len(), "listed directory");
    Ok(names)
}

/// Full paths of every entry under `root` (root included) whose base name
/// matches the filter. Depth-first pre-order, siblings by file name; the walk
/// stops at the first error.
pub fn list_files_recursive(root: &Path, prefix: &str, suffix: &str) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| walk_error(root, e))?;
        let matched = name_matches(&entry.file_name().to_string_lossy(), prefix, suffix);
        if matched {
            paths.push(entry.into_path());
        }
    }
    debug!(root = %root.display(), prefix, suffix, matches = paths.len(), "walked directory tree");
    Ok(paths)
}

fn walk_error(root: &Path, e: walkdir::Error) -> FileUtilsError {
    let path = e.path().unwrap_or(root).to_path_buf();
    let source = e
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
    FileUtilsError::Io {
        op: "walk directory",
        path,
        source,
    }
}
