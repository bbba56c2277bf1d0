// entry.rs
use camino::Utf8Path;
use std::{
    fs,
    hash::{Hash, Hasher},
    path::{Path, PathBuf, MAIN_SEPARATOR},
    time::SystemTime,
};

/// A filesystem path tagged with its directory classification
///
/// The path is normalized lexically on construction (`.` components and
/// trailing separators are dropped). Equality and hashing use the normalized
/// path only, so the same path classified differently is still one entry.
#[derive(Clone, Debug)]
pub struct PathEntry {
    path: PathBuf,
    is_dir: bool,
}

impl PathEntry {
    /// Creates an entry for `path`, normalizing it
    pub fn new(path: impl AsRef<Path>, is_dir: bool) -> Self {
        Self {
            path: normalize(path.as_ref()),
            is_dir,
        }
    }

    /// Shorthand for a directory entry
    pub fn dir(path: impl AsRef<Path>) -> Self {
        Self::new(path, true)
    }

    /// Shorthand for a non-directory entry
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self::new(path, false)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.path
    }

    /// The path as UTF-8, or `None` for non-UTF-8 paths
    pub fn utf8_path(&self) -> Option<&Utf8Path> {
        Utf8Path::from_path(&self.path)
    }

    /// Last path component, if the path is UTF-8 and has one
    pub fn file_name(&self) -> Option<&str> {
        self.utf8_path().and_then(Utf8Path::file_name)
    }

    /// Full path string with a trailing separator for directories
    pub fn display_path(&self) -> Option<String> {
        let mut s = self.utf8_path()?.as_str().to_string();
        if self.is_dir && !s.ends_with(MAIN_SEPARATOR) {
            s.push(MAIN_SEPARATOR);
        }
        Some(s)
    }
}

impl PartialEq for PathEntry {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for PathEntry {}

impl Hash for PathEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

impl AsRef<Path> for PathEntry {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

fn normalize(path: &Path) -> PathBuf {
    path.components().collect()
}

/// Anything that can be viewed as a [`PathEntry`]
///
/// Matchers written against path entries work on richer file models through
/// this trait (see [`FileInfoMatcher`](crate::patterns::FileInfoMatcher)).
pub trait AsPathEntry {
    fn path_entry(&self) -> &PathEntry;
}

impl AsPathEntry for PathEntry {
    fn path_entry(&self) -> &PathEntry {
        self
    }
}

/// A file model for callers that display enumeration results
///
/// Size and modification time are filled in on demand by
/// [`FileInfo::load_metadata`]; enumeration itself never stats files.
#[derive(Clone, Debug)]
pub struct FileInfo {
    entry: PathEntry,
    pub size: Option<u64>,
    pub modified: Option<SystemTime>,
}

impl FileInfo {
    pub fn new(entry: PathEntry) -> Self {
        Self {
            entry,
            size: None,
            modified: None,
        }
    }

    /// Display name (last path component, lossily decoded)
    pub fn name(&self) -> String {
        self.entry
            .path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn is_dir(&self) -> bool {
        self.entry.is_dir()
    }

    /// Reads size and modification time from the filesystem
    ///
    /// Directories keep `size` as `None`.
    pub fn load_metadata(&mut self) -> std::io::Result<()> {
        let meta = fs::metadata(self.entry.path())?;
        if !meta.is_dir() {
            self.size = Some(meta.len());
        }
        self.modified = meta.modified().ok();
        Ok(())
    }
}

impl From<PathEntry> for FileInfo {
    fn from(entry: PathEntry) -> Self {
        Self::new(entry)
    }
}

impl PartialEq for FileInfo {
    fn eq(&self, other: &Self) -> bool {
        self.entry == other.entry
    }
}

impl Eq for FileInfo {}

impl Hash for FileInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.entry.hash(state);
    }
}

impl AsPathEntry for FileInfo {
    fn path_entry(&self) -> &PathEntry {
        &self.entry
    }
}
