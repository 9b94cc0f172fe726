//! Filesystem utilities

use std::path::{Path, PathBuf};

use log::debug;

#[derive(thiserror::Error, Debug)]
pub enum FsError {
    #[error("File not found: {0}")]
    NotFound(String),
    #[error("Not a regular file: {0}")]
    NotAFile(String),
}

/// Resolve a path that must point at an existing regular file.
///
/// The dataset is opened read-only, so a missing file is an error here rather
/// than something to create.
pub fn require_file(path: &str) -> Result<PathBuf, FsError> {
    let p = Path::new(path);
    if !p.exists() {
        return Err(FsError::NotFound(path.to_string()));
    }
    if !p.is_file() {
        return Err(FsError::NotAFile(path.to_string()));
    }
    debug!("Using file: {}", p.display());
    Ok(p.to_path_buf())
}
