// predicates.rs
use crate::entry::PathEntry;

/// Entry kind filter applied to every listed directory
///
/// The filter decides what is reported, not where the walk goes: recursion
/// descends into every subdirectory whatever this is set to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FileType {
    /// Directories and non-directories
    #[default]
    All,
    /// Directories only
    DirectoryOnly,
    /// Everything that is not a directory
    NonDirectoryOnly,
}

impl FileType {
    /// Checks whether an entry passes this filter
    pub fn admits(self, entry: &PathEntry) -> bool {
        match self {
            FileType::All => true,
            FileType::DirectoryOnly => entry.is_dir(),
            FileType::NonDirectoryOnly => !entry.is_dir(),
        }
    }
}

/// Decides whether an entry is included in results
///
/// Implemented by [`PathPatternMatcher`](crate::patterns::PathPatternMatcher)
/// and by any `Fn(&PathEntry) -> bool` closure.
///
/// `Send + Sync` are required: matchers run on the enumeration worker.
pub trait PathMatcher: Send + Sync {
    fn is_match(&self, entry: &PathEntry) -> bool;
}

impl<F> PathMatcher for F
where
    F: Fn(&PathEntry) -> bool + Send + Sync,
{
    fn is_match(&self, entry: &PathEntry) -> bool {
        self(entry)
    }
}

/// Keeps the entries that pass both the type filter and the optional matcher
pub(crate) fn filter_entries(
    entries: &[PathEntry],
    file_type: FileType,
    matcher: Option<&dyn PathMatcher>,
) -> Vec<PathEntry> {
    entries
        .iter()
        .filter(|e| file_type.admits(e))
        .filter(|e| matcher.map_or(true, |m| m.is_match(e)))
        .cloned()
        .collect()
}
