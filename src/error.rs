// error.rs
use std::{
    io,
    path::{Path, PathBuf},
    sync::Arc,
};
use thiserror::Error;

/// Error types for enumeration and matcher construction
///
/// Pattern errors are raised synchronously when a matcher is built and are
/// never delivered through a listing. Filesystem errors end a walk and are
/// carried by the final [`Listing`](crate::sync::Listing).
#[derive(Error, Debug, Clone)]
pub enum SiftError {
    /// Pattern could not be compiled for the requested matching method
    #[error("Invalid pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// A directory could not be read
    #[error("Cannot list {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: Arc<io::Error>,
    },

    /// The listing target exists but is not a directory
    #[error("Not a directory: {}: {source}", .path.display())]
    NotADirectory {
        path: PathBuf,
        #[source]
        source: Arc<io::Error>,
    },

    /// The background worker could not be started or did not finish
    #[error("Enumeration worker failed: {0}")]
    Worker(String),
}

impl SiftError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source: Arc::new(source),
        }
    }

    pub(crate) fn not_a_directory(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::NotADirectory {
            path: path.into(),
            source: Arc::new(source),
        }
    }

    pub(crate) fn invalid_pattern(pattern: &str, reason: impl ToString) -> Self {
        Self::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Converts a walkdir failure for `dir`, keeping the OS error when present
    pub(crate) fn from_walkdir(dir: &Path, err: walkdir::Error) -> Self {
        let path = err
            .path()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| dir.to_path_buf());
        let message = err.to_string();
        let source = err
            .into_io_error()
            .unwrap_or_else(|| io::Error::other(message));
        Self::io(path, source)
    }

    /// The path this error occurred at, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Io { path, .. } | Self::NotADirectory { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Whether this error came from the filesystem
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::NotADirectory { .. })
    }

    /// The underlying OS error for I/O failures
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            Self::Io { source, .. } | Self::NotADirectory { source, .. } => Some(&**source),
            _ => None,
        }
    }

    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        self.io_error().map(io::Error::kind)
    }

    /// The raw OS error code, when the failure came from the OS
    pub fn raw_os_error(&self) -> Option<i32> {
        self.io_error().and_then(io::Error::raw_os_error)
    }
}
