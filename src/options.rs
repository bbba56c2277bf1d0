// options.rs
use crate::{
    entry::PathEntry,
    predicates::{FileType, PathMatcher},
    sync::Listing,
};
use std::{
    fmt,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

/// Polled at the start of every directory; `true` stops the walk
pub type CancellationCheck = Arc<dyn Fn() -> bool + Send + Sync>;

/// Receives each non-empty batch of matches, one per directory
pub type BatchHandler = Arc<dyn Fn(&[PathEntry]) + Send + Sync>;

/// Receives the final listing, exactly once
pub type CompletionHandler = Box<dyn FnOnce(Listing) + Send>;

/// Shared cancellation token
///
/// Clones share one flag. The walk polls it at directory boundaries, so a
/// directory whose listing is already in progress finishes first.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Configuration for a single enumeration
///
/// Built per call and consumed by it. The callbacks run on the enumeration
/// worker, not on the caller's thread.
pub struct ListingOptions {
    /// Which entry kinds are reported
    pub file_type: FileType,

    /// Whether to descend into subdirectories
    pub recursive: bool,

    /// Deepest directory level to list when recursive (root is 0, None for unlimited)
    pub max_depth: Option<usize>,

    /// Inclusion filter evaluated per entry after the type filter
    pub matcher: Option<Arc<dyn PathMatcher>>,

    /// Cancellation check polled before each directory
    pub cancellation: Option<CancellationCheck>,

    /// Called with each directory's non-empty batch of matches
    pub on_batch: Option<BatchHandler>,

    /// Called once with the accumulated result
    pub on_complete: Option<CompletionHandler>,
}

impl Default for ListingOptions {
    fn default() -> Self {
        Self {
            file_type: FileType::All,
            recursive: false,
            max_depth: None,
            matcher: None,
            cancellation: None,
            on_batch: None,
            on_complete: None,
        }
    }
}

impl ListingOptions {
    pub fn builder() -> ListingOptionsBuilder {
        ListingOptionsBuilder::new()
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancellation.as_ref().is_some_and(|check| check())
    }
}

impl fmt::Debug for ListingOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListingOptions")
            .field("file_type", &self.file_type)
            .field("recursive", &self.recursive)
            .field("max_depth", &self.max_depth)
            .field("matcher", &self.matcher.is_some())
            .field("cancellation", &self.cancellation.is_some())
            .field("on_batch", &self.on_batch.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

/// Builder for ListingOptions for fluent configuration
#[derive(Default)]
pub struct ListingOptionsBuilder(ListingOptions);

impl ListingOptionsBuilder {
    /// Creates a new builder with default options
    pub fn new() -> Self {
        Self(ListingOptions::default())
    }

    pub fn file_type(mut self, t: FileType) -> Self {
        self.0.file_type = t;
        self
    }

    pub fn recursive(mut self, v: bool) -> Self {
        self.0.recursive = v;
        self
    }

    pub fn max_depth(mut self, d: usize) -> Self {
        self.0.max_depth = Some(d);
        self
    }

    /// Sets the inclusion matcher
    pub fn matcher(mut self, m: impl PathMatcher + 'static) -> Self {
        self.0.matcher = Some(Arc::new(m));
        self
    }

    /// Sets an already shared inclusion matcher
    pub fn shared_matcher(mut self, m: Arc<dyn PathMatcher>) -> Self {
        self.0.matcher = Some(m);
        self
    }

    /// Sets the inclusion filter from a closure
    pub fn match_with<F>(self, f: F) -> Self
    where
        F: Fn(&PathEntry) -> bool + Send + Sync + 'static,
    {
        self.matcher(f)
    }

    /// Sets the cancellation check
    pub fn cancel_when<F>(mut self, f: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.0.cancellation = Some(Arc::new(f));
        self
    }

    /// Uses a [`CancelFlag`] as the cancellation check
    pub fn cancel_flag(self, flag: CancelFlag) -> Self {
        self.cancel_when(move || flag.is_cancelled())
    }

    pub fn on_batch<F>(mut self, f: F) -> Self
    where
        F: Fn(&[PathEntry]) + Send + Sync + 'static,
    {
        self.0.on_batch = Some(Arc::new(f));
        self
    }

    pub fn on_complete<F>(mut self, f: F) -> Self
    where
        F: FnOnce(Listing) + Send + 'static,
    {
        self.0.on_complete = Some(Box::new(f));
        self
    }

    /// Builds the final ListingOptions instance
    pub fn build(self) -> ListingOptions {
        self.0
    }
}
