// sync.rs
use crate::{
    entry::PathEntry, error::SiftError, lister::DirectoryLister, options::ListingOptions,
    predicates::filter_entries,
};
use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

/// Final result of an enumeration
///
/// `entries` is every batch delivered, concatenated in delivery order. When
/// `error` is set the walk stopped early and `entries` holds what was found
/// before the failure.
#[derive(Clone, Debug, Default)]
pub struct Listing {
    pub entries: Vec<PathEntry>,
    pub error: Option<SiftError>,
}

impl Listing {
    /// Whether the walk ended without a filesystem error
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Converts to a `Result`, dropping partial entries on error
    pub fn into_result(self) -> Result<Vec<PathEntry>, SiftError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.entries),
        }
    }
}

/// How a walk ended, for logging
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum WalkEnd {
    Exhausted,
    Cancelled,
    Failed,
}

/// Records directory identities so a directory is listed at most once
///
/// Only active for listers that report identities (symlink-following ones).
fn check_for_cycles(
    lister: &dyn DirectoryLister,
    dir: &Path,
    visited: &mut HashSet<PathBuf>,
) -> bool {
    match lister.identity(dir) {
        Some(id) => !visited.insert(id),
        None => false,
    }
}

/// Walks `root` depth-first in pre-order on the calling thread
///
/// For every directory visited: poll cancellation, list children, filter by
/// type and matcher, hand a non-empty batch to `emit`, then queue the
/// subdirectories (all of them, unfiltered) when recursive. `emit` returning
/// `false` stops the walk the same way cancellation does.
///
/// The first listing failure ends the whole walk. Callbacks in `options` are
/// not invoked here; see [`run`].
pub(crate) fn walk(
    lister: &dyn DirectoryLister,
    root: &Path,
    options: &ListingOptions,
    emit: &mut dyn FnMut(&[PathEntry]) -> bool,
) -> (Listing, WalkEnd) {
    let mut listing = Listing::default();
    let mut visited = HashSet::new();
    let matcher = options.matcher.as_deref();
    // (directory, depth); children are pushed reversed so the first is popped first
    let mut stack = vec![(root.to_path_buf(), 0usize)];

    while let Some((dir, depth)) = stack.pop() {
        if options.is_cancelled() {
            tracing::debug!(dir = %dir.display(), "enumeration cancelled");
            return (listing, WalkEnd::Cancelled);
        }

        if check_for_cycles(lister, &dir, &mut visited) {
            tracing::debug!(dir = %dir.display(), "skipping already visited directory");
            continue;
        }

        let children = match lister.list_children(&dir) {
            Ok(children) => children,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "directory listing failed");
                listing.error = Some(e);
                return (listing, WalkEnd::Failed);
            }
        };
        tracing::debug!(dir = %dir.display(), children = children.len(), "listed directory");

        let batch = filter_entries(&children, options.file_type, matcher);
        if !batch.is_empty() {
            tracing::debug!(dir = %dir.display(), matches = batch.len(), "delivering batch");
            let keep_going = emit(&batch);
            listing.entries.extend(batch);
            if !keep_going {
                return (listing, WalkEnd::Cancelled);
            }
        }

        let descend = options.recursive && options.max_depth.map_or(true, |max| depth < max);
        if descend {
            let subdirs: Vec<PathBuf> = children
                .into_iter()
                .filter(PathEntry::is_dir)
                .map(PathEntry::into_path_buf)
                .collect();
            stack.extend(subdirs.into_iter().rev().map(|d| (d, depth + 1)));
        }
    }

    (listing, WalkEnd::Exhausted)
}

/// Runs a full enumeration on the calling thread, invoking the callbacks
///
/// `forward` sees every batch after `on_batch` has; returning `false` stops
/// the walk. The completion callback gets a copy of the returned listing.
pub(crate) fn run(
    lister: &dyn DirectoryLister,
    root: &Path,
    mut options: ListingOptions,
    forward: &mut dyn FnMut(&[PathEntry]) -> bool,
) -> Listing {
    let on_complete = options.on_complete.take();
    let on_batch = options.on_batch.clone();

    let (listing, end) = walk(lister, root, &options, &mut |batch| {
        if let Some(cb) = &on_batch {
            cb(batch);
        }
        forward(batch)
    });

    tracing::info!(
        root = %root.display(),
        matches = listing.len(),
        cancelled = end == WalkEnd::Cancelled,
        failed = end == WalkEnd::Failed,
        "enumeration finished"
    );

    if let Some(cb) = on_complete {
        cb(listing.clone());
    }
    listing
}

/// Performs a blocking enumeration on the calling thread
///
/// Same traversal and callbacks as the background variant; the final listing
/// is also returned.
pub fn list_sync(lister: &dyn DirectoryLister, root: &Path, options: ListingOptions) -> Listing {
    run(lister, root, options, &mut |_| true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lister::FsLister;
    use crate::predicates::FileType;
    use std::fs;
    use std::sync::{Arc, Mutex};
    use tracing_test::traced_test;

    fn tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::create_dir_all(dir.path().join("sub/deeper")).unwrap();
        fs::write(dir.path().join("sub/b.txt"), "b").unwrap();
        fs::write(dir.path().join("sub/deeper/c.txt"), "c").unwrap();
        dir
    }

    #[test]
    fn flat_walk_lists_root_only() {
        let dir = tree();
        let opts = ListingOptions::builder()
            .file_type(FileType::NonDirectoryOnly)
            .build();
        let listing = list_sync(&FsLister::new(), dir.path(), opts);
        assert!(listing.is_ok());
        assert_eq!(listing.entries, vec![PathEntry::file(dir.path().join("a.txt"))]);
    }

    #[test]
    fn max_depth_limits_descent() {
        let dir = tree();
        let opts = ListingOptions::builder()
            .recursive(true)
            .max_depth(1)
            .file_type(FileType::NonDirectoryOnly)
            .build();
        let mut names: Vec<_> = list_sync(&FsLister::new(), dir.path(), opts)
            .entries
            .iter()
            .filter_map(|e| e.file_name().map(str::to_string))
            .collect();
        names.sort();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn emit_false_stops_walk() {
        let dir = tree();
        let opts = ListingOptions::builder().recursive(true).build();
        let (listing, end) = walk(&FsLister::new(), dir.path(), &opts, &mut |_| false);
        assert_eq!(end, WalkEnd::Cancelled);
        // only the root batch was taken
        assert_eq!(listing.len(), 2);
    }

    #[test]
    fn completion_receives_returned_listing() {
        let dir = tree();
        let seen = Arc::new(Mutex::new(None));
        let sink = seen.clone();
        let opts = ListingOptions::builder()
            .recursive(true)
            .on_complete(move |l| *sink.lock().unwrap() = Some(l.len()))
            .build();
        let listing = list_sync(&FsLister::new(), dir.path(), opts);
        assert_eq!(*seen.lock().unwrap(), Some(listing.len()));
        assert_eq!(listing.len(), 5);
    }

    #[cfg(unix)]
    #[test]
    fn symlink_cycle_is_walked_once() {
        let dir = tree();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("sub/loop")).unwrap();
        let opts = ListingOptions::builder()
            .recursive(true)
            .file_type(FileType::NonDirectoryOnly)
            .build();
        let lister = FsLister::new().follow_symlinks(true);
        let listing = list_sync(&lister, dir.path(), opts);
        assert!(listing.is_ok());
        assert_eq!(listing.len(), 3);
    }

    #[test]
    #[traced_test]
    fn failed_listing_is_logged() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let listing = list_sync(&FsLister::new(), &missing, ListingOptions::default());
        assert!(listing.error.as_ref().is_some_and(SiftError::is_io));
        assert!(listing.is_empty());
        assert!(logs_contain("directory listing failed"));
    }
}
