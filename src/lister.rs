// lister.rs
use crate::{classify::classify, entry::PathEntry, error::SiftError};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Lists the immediate children of a directory
///
/// This is the only filesystem access the enumerator performs. Implement it
/// to enumerate something other than the local filesystem, or to inject
/// failures in tests.
pub trait DirectoryLister: Send + Sync {
    /// Returns the children of `dir` as full paths with their classification
    ///
    /// Fails when `dir` does not exist, is not a directory, or cannot be read.
    /// No order is guaranteed.
    fn list_children(&self, dir: &Path) -> Result<Vec<PathEntry>, SiftError>;

    /// A stable identity for `dir`, used to avoid revisiting a directory
    ///
    /// Listers that can reach the same directory through different paths
    /// (by following symlinks) return its canonical path here. `None` turns
    /// revisit detection off.
    fn identity(&self, _dir: &Path) -> Option<PathBuf> {
        None
    }
}

/// [`DirectoryLister`] backed by the local filesystem
#[derive(Clone, Debug, Default)]
pub struct FsLister {
    follow_symlinks: bool,
}

impl FsLister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether symlinks to directories count as directories
    pub fn follow_symlinks(mut self, v: bool) -> Self {
        self.follow_symlinks = v;
        self
    }

    pub fn follows_symlinks(&self) -> bool {
        self.follow_symlinks
    }
}

/// Fails unless `dir` is a directory, keeping the OS error of the failure
///
/// walkdir yields nothing (rather than an error) for a root that is a file,
/// so the target is checked before walking.
fn check_target(dir: &Path) -> Result<(), SiftError> {
    let meta = fs::metadata(dir).map_err(|e| SiftError::io(dir, e))?;
    if meta.is_dir() {
        return Ok(());
    }
    let source = match fs::read_dir(dir) {
        Err(e) => e,
        Ok(_) => io::Error::other("not a directory"),
    };
    Err(SiftError::not_a_directory(dir, source))
}

impl DirectoryLister for FsLister {
    fn list_children(&self, dir: &Path) -> Result<Vec<PathEntry>, SiftError> {
        check_target(dir)?;

        let mut children = Vec::new();
        for entry in WalkDir::new(dir)
            .follow_links(false)
            .min_depth(1)
            .max_depth(1)
        {
            let dent = entry.map_err(|e| SiftError::from_walkdir(dir, e))?;
            let ft = dent.file_type();

            let is_dir = if ft.is_symlink() {
                self.follow_symlinks && classify(dent.path(), true).is_dir()
            } else {
                ft.is_dir()
            };

            children.push(PathEntry::new(dent.path(), is_dir));
        }

        Ok(children)
    }

    fn identity(&self, dir: &Path) -> Option<PathBuf> {
        if self.follow_symlinks {
            fs::canonicalize(dir).ok()
        } else {
            None
        }
    }
}
