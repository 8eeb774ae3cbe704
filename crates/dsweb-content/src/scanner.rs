//! Markdown discovery by filesystem walking.
//!
//! This module separates the discovery phase (finding files) from the
//! building phase (reading and deriving [`ContentNode`](crate::ContentNode)s).

use std::fs;
use std::path::{Path, PathBuf};

use crate::source::ContentError;

/// Discovers markdown files below a content root.
pub(crate) struct Scanner {
    source_dir: PathBuf,
}

impl Scanner {
    pub(crate) fn new(source_dir: PathBuf) -> Self {
        Self { source_dir }
    }

    /// Return paths of all `.md` files, relative to the content root,
    /// sorted for a deterministic build order.
    ///
    /// Hidden files and directories are skipped. Returns an empty Vec if the
    /// root doesn't exist.
    ///
    /// # Errors
    ///
    /// Fails if any directory below the root cannot be listed.
    pub(crate) fn scan(&self) -> Result<Vec<PathBuf>, ContentError> {
        let mut found = Vec::new();
        if self.source_dir.exists() {
            Self::scan_directory(&self.source_dir, Path::new(""), &mut found)?;
        }
        found.sort();
        Ok(found)
    }

    fn scan_directory(
        dir_path: &Path,
        relative: &Path,
        found: &mut Vec<PathBuf>,
    ) -> Result<(), ContentError> {
        let entries = fs::read_dir(dir_path).map_err(|e| ContentError::io(e, dir_path))?;

        for entry in entries {
            let entry = entry.map_err(|e| ContentError::io(e, dir_path))?;
            let name = entry.file_name();
            if name.to_string_lossy().starts_with('.') {
                continue;
            }

            let path = entry.path();
            let child = relative.join(&name);
            let file_type = entry.file_type().map_err(|e| ContentError::io(e, &path))?;
            if file_type.is_dir() {
                Self::scan_directory(&path, &child, found)?;
            } else if path.extension().is_some_and(|e| e == "md") {
                found.push(child);
            }
        }
        Ok(())
    }
}
