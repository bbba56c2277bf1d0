// patterns/mod.rs
pub mod cache;
pub mod text;

pub use cache::{cache_metrics, clear_cache, CacheMetrics};
pub use text::TextMatcher;

use crate::{
    entry::{AsPathEntry, PathEntry},
    error::SiftError,
    predicates::PathMatcher,
};
use std::{fmt, marker::PhantomData};

/// Which part of a path is fed to the text matcher
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MatchingTarget {
    /// Last path component (`photo.jpg`)
    #[default]
    FullName,
    /// Last component without its final extension (`photo.tar` for `photo.tar.gz`)
    NameWithoutExtension,
    /// Final extension without the dot, empty if none (`gz`)
    Extension,
    /// Whole path, with a trailing separator for directories
    FullPath,
    /// Path of the containing directory (`/a/b` for `/a/b/photo.jpg`)
    ParentDirectoryPath,
}

impl MatchingTarget {
    /// Extracts the comparison string for `entry`
    ///
    /// Returns `None` for paths that are not valid UTF-8.
    pub fn extract(self, entry: &PathEntry) -> Option<String> {
        let path = entry.utf8_path()?;
        let text = match self {
            MatchingTarget::FullName => path.file_name().unwrap_or_default().to_string(),
            MatchingTarget::NameWithoutExtension => {
                path.file_stem().unwrap_or_default().to_string()
            }
            MatchingTarget::Extension => path.extension().unwrap_or_default().to_string(),
            MatchingTarget::FullPath => entry.display_path()?,
            MatchingTarget::ParentDirectoryPath => {
                path.parent().map(|p| p.as_str()).unwrap_or_default().to_string()
            }
        };
        Some(text)
    }
}

/// How the pattern is interpreted
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MatchingMethod {
    #[default]
    Substring,
    Regex,
    Glob,
}

impl MatchingMethod {
    /// Compiles `pattern` into a text matcher for this method
    pub fn compile(self, pattern: &str) -> Result<TextMatcher, SiftError> {
        match self {
            MatchingMethod::Substring => Ok(TextMatcher::substring(pattern)),
            MatchingMethod::Regex => TextMatcher::regex(pattern),
            MatchingMethod::Glob => TextMatcher::glob(pattern),
        }
    }
}

/// Matches paths by a pattern applied to one extracted part of the path
///
/// Two matchers are equal when pattern, target and method are equal; the
/// compiled matcher is derived from those three and is not compared.
#[derive(Clone, Debug)]
pub struct PathPatternMatcher {
    pattern: String,
    target: MatchingTarget,
    method: MatchingMethod,
    matcher: TextMatcher,
}

impl PathPatternMatcher {
    /// # Errors
    ///
    /// Returns `SiftError::InvalidPattern` when `method` is `Regex` or `Glob`
    /// and `pattern` does not compile. Never fails for `Substring`.
    pub fn new(
        pattern: impl Into<String>,
        target: MatchingTarget,
        method: MatchingMethod,
    ) -> Result<Self, SiftError> {
        let pattern = pattern.into();
        let matcher = method.compile(&pattern)?;
        Ok(Self {
            pattern,
            target,
            method,
            matcher,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn target(&self) -> MatchingTarget {
        self.target
    }

    pub fn method(&self) -> MatchingMethod {
        self.method
    }

    /// Tests the extracted part of `entry`; non-UTF-8 paths never match
    pub fn matches(&self, entry: &PathEntry) -> bool {
        self.target
            .extract(entry)
            .is_some_and(|text| self.matcher.is_match(&text))
    }
}

impl PartialEq for PathPatternMatcher {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern && self.target == other.target && self.method == other.method
    }
}

impl Eq for PathPatternMatcher {}

impl PathMatcher for PathPatternMatcher {
    fn is_match(&self, entry: &PathEntry) -> bool {
        self.matches(entry)
    }
}

/// Applies a path matcher to any entity that exposes a [`PathEntry`]
pub struct FileInfoMatcher<T, M = PathPatternMatcher> {
    inner: M,
    _entity: PhantomData<fn(&T)>,
}

impl<T: AsPathEntry, M: PathMatcher> FileInfoMatcher<T, M> {
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            _entity: PhantomData,
        }
    }

    pub fn inner(&self) -> &M {
        &self.inner
    }

    pub fn is_match(&self, item: &T) -> bool {
        self.inner.is_match(item.path_entry())
    }

    /// Keeps the items that match, preserving order
    pub fn filter<'a, I>(&'a self, items: I) -> impl Iterator<Item = &'a T> + 'a
    where
        I: IntoIterator<Item = &'a T>,
        I::IntoIter: 'a,
    {
        items.into_iter().filter(move |item| self.is_match(item))
    }
}

impl<T, M: Clone> Clone for FileInfoMatcher<T, M> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T, M: PartialEq> PartialEq for FileInfoMatcher<T, M> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T, M: Eq> Eq for FileInfoMatcher<T, M> {}

impl<T, M: fmt::Debug> fmt::Debug for FileInfoMatcher<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileInfoMatcher")
            .field("inner", &self.inner)
            .finish()
    }
}

/// Builds a matcher that never fails to construct
pub fn substring_matcher(pattern: impl Into<String>) -> TextMatcher {
    TextMatcher::substring(pattern)
}

/// Builds a regex matcher, failing on invalid syntax
pub fn regex_matcher(pattern: &str) -> Result<TextMatcher, SiftError> {
    TextMatcher::regex(pattern)
}

/// Builds a path pattern matcher
pub fn path_matcher(
    pattern: impl Into<String>,
    target: MatchingTarget,
    method: MatchingMethod,
) -> Result<PathPatternMatcher, SiftError> {
    PathPatternMatcher::new(pattern, target, method)
}
