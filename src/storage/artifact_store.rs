// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! On-disk artifact storage for uploads, enhanced images and results
//!
//! Paths are derived from the uploaded filename only, so two requests that
//! upload the same name share the same staging, enhanced and result files.

use std::fs;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

/// Prefix for enhanced images
pub const ENHANCED_PREFIX: &str = "enh_";

/// Prefix for annotated results
pub const RESULT_PREFIX: &str = "result_";

/// Errors raised by the artifact store
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid upload filename: '{0}'")]
    InvalidFilename(String),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Three sibling directories holding every artifact the service writes
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    upload_dir: PathBuf,
    enhanced_dir: PathBuf,
    result_dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(
        upload_dir: impl Into<PathBuf>,
        enhanced_dir: impl Into<PathBuf>,
        result_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            enhanced_dir: enhanced_dir.into(),
            result_dir: result_dir.into(),
        }
    }

    /// Store rooted at the directories named in the service configuration
    pub fn from_config(config: &crate::config::ServiceConfig) -> Self {
        Self::new(
            config.upload_dir.clone(),
            config.enhanced_dir.clone(),
            config.result_dir.clone(),
        )
    }

    /// Store with all three directories under `root`
    pub fn rooted_at(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self::new(
            root.join("uploads"),
            root.join("enhanced"),
            root.join("results"),
        )
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    pub fn enhanced_dir(&self) -> &Path {
        &self.enhanced_dir
    }

    pub fn result_dir(&self) -> &Path {
        &self.result_dir
    }

    /// Create the artifact directories if they do not exist yet
    pub fn ensure_dirs(&self) -> Result<(), StorageError> {
        for dir in [&self.upload_dir, &self.enhanced_dir, &self.result_dir] {
            fs::create_dir_all(dir).map_err(|e| StorageError::io(dir, e))?;
            debug!("Artifact directory ready: {}", dir.display());
        }
        info!(
            "📁 Artifact directories ready (uploads: {}, enhanced: {}, results: {})",
            self.upload_dir.display(),
            self.enhanced_dir.display(),
            self.result_dir.display()
        );
        Ok(())
    }

    /// Write an uploaded file verbatim into the staging directory
    ///
    /// Creates or overwrites `<upload_dir>/<filename>` and returns its path.
    pub fn save_upload(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, StorageError> {
        let name = sanitize_filename(filename)?;
        let path = self.upload_dir.join(name);
        fs::write(&path, bytes).map_err(|e| StorageError::io(&path, e))?;
        debug!("Saved upload ({} bytes) to {}", bytes.len(), path.display());
        Ok(path)
    }

    /// Read a stored artifact back from disk
    pub fn read(&self, path: &Path) -> Result<Vec<u8>, StorageError> {
        fs::read(path).map_err(|e| StorageError::io(path, e))
    }

    /// `<enhanced_dir>/enh_<filename>`
    pub fn enhanced_path(&self, filename: &str) -> Result<PathBuf, StorageError> {
        let name = sanitize_filename(filename)?;
        Ok(self.enhanced_dir.join(format!("{}{}", ENHANCED_PREFIX, name)))
    }

    /// `<result_dir>/result_<filename>`
    pub fn result_path(&self, filename: &str) -> Result<PathBuf, StorageError> {
        let name = sanitize_filename(filename)?;
        Ok(self.result_dir.join(format!("{}{}", RESULT_PREFIX, name)))
    }
}

/// Reduce a client-supplied filename to its final path component
///
/// Directory parts are dropped so an upload can never escape the artifact
/// directories. Names with nothing usable left are rejected.
pub fn sanitize_filename(filename: &str) -> Result<&str, StorageError> {
    // Windows clients may send backslash-separated paths
    let last = filename.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or("");

    match Path::new(last).components().next() {
        Some(Component::Normal(_)) if !last.trim().is_empty() => Ok(last),
        _ => Err(StorageError::InvalidFilename(filename.to_string())),
    }
}
