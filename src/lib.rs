// lib.rs
#![forbid(unsafe_code)]

#[cfg(feature = "async")]
pub mod async_walk;
pub mod classify;
pub mod entry;
pub mod error;
pub mod lister;
pub mod options;
pub mod patterns;
pub mod predicates;
pub mod search;
pub mod sync;
pub mod worker;

#[cfg(feature = "async")]
pub use crate::async_walk::ListingEvent;
pub use crate::entry::{AsPathEntry, FileInfo, PathEntry};
pub use crate::error::SiftError;
pub use crate::lister::{DirectoryLister, FsLister};
pub use crate::options::{CancelFlag, ListingOptions, ListingOptionsBuilder};
pub use crate::patterns::{
    FileInfoMatcher, MatchingMethod, MatchingTarget, PathPatternMatcher, TextMatcher,
};
pub use crate::predicates::{FileType, PathMatcher};
pub use crate::search::{SearchOptions, SearchScope};
pub use crate::sync::Listing;
pub use crate::worker::EnumerationHandle;

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

/// Directory enumeration service
///
/// Holds the [`DirectoryLister`] it reads through and nothing else: every
/// enumeration owns its own state, so one `Enumerator` can run any number
/// of independent enumerations at once. Identical concurrent requests are
/// not merged.
#[derive(Clone)]
pub struct Enumerator {
    lister: Arc<dyn DirectoryLister>,
}

impl Default for Enumerator {
    fn default() -> Self {
        Self::new(FsLister::new())
    }
}

impl fmt::Debug for Enumerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Enumerator").finish_non_exhaustive()
    }
}

impl Enumerator {
    /// Creates an enumerator reading through `lister`
    pub fn new(lister: impl DirectoryLister + 'static) -> Self {
        Self {
            lister: Arc::new(lister),
        }
    }

    /// Creates an enumerator from an already shared lister
    pub fn with_lister(lister: Arc<dyn DirectoryLister>) -> Self {
        Self { lister }
    }

    /// The lister every enumeration started from here reads through
    pub fn lister(&self) -> &dyn DirectoryLister {
        &*self.lister
    }

    /// Enumerates `root` on a background worker and returns immediately
    ///
    /// Results arrive only through the callbacks in `options`: `on_batch`
    /// once per directory with a non-empty set of matches, in pre-order,
    /// then `on_complete` exactly once. Both run on the worker thread.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dirsift::{Enumerator, FileType, ListingOptions};
    ///
    /// let handle = Enumerator::default().enumerate(
    ///     "/tmp",
    ///     ListingOptions::builder()
    ///         .recursive(true)
    ///         .file_type(FileType::NonDirectoryOnly)
    ///         .on_batch(|batch| println!("{} more", batch.len()))
    ///         .on_complete(|listing| println!("done: {}", listing.len()))
    ///         .build(),
    /// );
    /// handle.join().unwrap();
    /// ```
    pub fn enumerate(&self, root: impl Into<PathBuf>, options: ListingOptions) -> EnumerationHandle {
        worker::spawn(self.lister.clone(), root.into(), options)
    }

    /// Enumerates `root` on the calling thread
    ///
    /// Callbacks fire exactly as for [`Enumerator::enumerate`]; the final
    /// listing is also returned.
    pub fn list_sync(&self, root: impl AsRef<Path>, options: ListingOptions) -> Listing {
        sync::list_sync(&*self.lister, root.as_ref(), options)
    }

    /// Lists the immediate children of `dir` that pass `file_type`
    ///
    /// # Errors
    ///
    /// Returns the lister's error if `dir` cannot be listed
    pub fn list_directory(
        &self,
        dir: impl AsRef<Path>,
        file_type: FileType,
    ) -> Result<Vec<PathEntry>, SiftError> {
        let children = self.lister.list_children(dir.as_ref())?;
        Ok(children.into_iter().filter(|e| file_type.admits(e)).collect())
    }

    /// Creates a stream of results for asynchronous enumeration
    ///
    /// Yields one [`ListingEvent::Batch`] per directory with matches and a
    /// final [`ListingEvent::Complete`]. Must be polled inside a Tokio
    /// runtime.
    #[cfg(feature = "async")]
    pub fn stream(
        &self,
        root: impl Into<PathBuf>,
        options: ListingOptions,
    ) -> impl futures::Stream<Item = ListingEvent> {
        async_walk::listing_stream(self.lister.clone(), root.into(), options)
    }

    /// Runs a search described by `search` in the background
    ///
    /// The matcher is compiled before anything is listed, so an invalid
    /// pattern is returned here and no enumeration starts. `builder` supplies
    /// callbacks and cancellation; the search sets matcher, recursion and
    /// type filter.
    pub fn search(
        &self,
        current: impl AsRef<Path>,
        root: impl AsRef<Path>,
        search: &SearchOptions,
        builder: ListingOptionsBuilder,
    ) -> Result<EnumerationHandle, SiftError> {
        let options = search.listing_options(builder)?;
        let start = search.resolve(current.as_ref(), root.as_ref());

        tracing::info!(
            pattern = %search.pattern,
            scope = ?search.scope,
            target = ?search.target,
            method = ?search.method,
            start = %start.display(),
            "searching"
        );

        Ok(self.enumerate(start, options))
    }
}
