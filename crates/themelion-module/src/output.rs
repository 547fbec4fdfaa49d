//! Writing generated modules to disk.

use std::path::Path;

use tracing::debug;

use crate::error::{ModuleError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// The file already held identical content and was left untouched.
    Unchanged,
}

/// Writes `contents` to `path` unless the file already holds the same bytes.
///
/// Parent directories are created as needed. Leaving identical files alone
/// keeps downstream file watchers from seeing a change that is not one.
pub fn write_if_changed(path: &Path, contents: &str) -> Result<WriteOutcome> {
    if let Ok(existing) = std::fs::read(path)
        && existing == contents.as_bytes()
    {
        debug!(path = %path.display(), "module unchanged");
        return Ok(WriteOutcome::Unchanged);
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| ModuleError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, contents).map_err(|source| ModuleError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = contents.len(), "module written");
    Ok(WriteOutcome::Written)
}
