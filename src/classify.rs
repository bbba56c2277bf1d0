// classify.rs
use std::{fs, path::Path};

/// What a path currently refers to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathKind {
    /// Nothing exists at the path (or it is a dangling symlink being followed)
    Missing,
    Directory,
    NonDirectory,
}

impl PathKind {
    pub fn exists(self) -> bool {
        self != PathKind::Missing
    }

    pub fn is_dir(self) -> bool {
        self == PathKind::Directory
    }
}

/// Determines whether `path` exists and whether it is a directory
///
/// With `follow_symlinks` a link is classified by its target and a dangling
/// link reports [`PathKind::Missing`]. Without it a link is always a
/// non-directory.
pub fn classify(path: &Path, follow_symlinks: bool) -> PathKind {
    let meta = if follow_symlinks {
        fs::metadata(path)
    } else {
        fs::symlink_metadata(path)
    };

    match meta {
        Ok(m) if m.is_dir() => PathKind::Directory,
        Ok(_) => PathKind::NonDirectory,
        Err(_) => PathKind::Missing,
    }
}
