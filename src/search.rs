// search.rs
use crate::{
    error::SiftError,
    options::{ListingOptions, ListingOptionsBuilder},
    patterns::{MatchingMethod, MatchingTarget, PathPatternMatcher},
    predicates::FileType,
};
use std::{fmt, path::Path};

/// Where a search starts and whether it recurses
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SearchScope {
    CurrentDir,
    #[default]
    CurrentDirRecursively,
    RootDirRecursively,
}

impl SearchScope {
    pub const ALL: [SearchScope; 3] = [
        SearchScope::CurrentDir,
        SearchScope::CurrentDirRecursively,
        SearchScope::RootDirRecursively,
    ];

    pub fn is_current_dir(self) -> bool {
        matches!(self, SearchScope::CurrentDir | SearchScope::CurrentDirRecursively)
    }

    pub fn is_recursive(self) -> bool {
        matches!(
            self,
            SearchScope::CurrentDirRecursively | SearchScope::RootDirRecursively
        )
    }

    pub fn description(self) -> &'static str {
        match self {
            SearchScope::CurrentDir => "Current Folder Only",
            SearchScope::CurrentDirRecursively => "Current Folder Recursively",
            SearchScope::RootDirRecursively => "Root Folder Recursively",
        }
    }
}

impl fmt::Display for SearchScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// A user-level search request
///
/// Equal options describe the same search, so a caller can skip re-running
/// a search whose options did not change.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SearchOptions {
    pub pattern: String,
    pub scope: SearchScope,
    pub target: MatchingTarget,
    pub method: MatchingMethod,
}

impl SearchOptions {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            ..Self::default()
        }
    }

    pub fn scope(mut self, scope: SearchScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn target(mut self, target: MatchingTarget) -> Self {
        self.target = target;
        self
    }

    pub fn method(mut self, method: MatchingMethod) -> Self {
        self.method = method;
        self
    }

    /// Picks the start directory for this scope
    pub fn resolve<'a>(&self, current: &'a Path, root: &'a Path) -> &'a Path {
        if self.scope.is_current_dir() {
            current
        } else {
            root
        }
    }

    /// Compiles the path matcher for this search
    ///
    /// # Errors
    ///
    /// Returns `SiftError::InvalidPattern` for a pattern that does not compile
    /// under the chosen method
    pub fn build_matcher(&self) -> Result<PathPatternMatcher, SiftError> {
        PathPatternMatcher::new(self.pattern.as_str(), self.target, self.method)
    }

    /// Completes `builder` with this search's matcher, recursion and type filter
    pub fn listing_options(
        &self,
        builder: ListingOptionsBuilder,
    ) -> Result<ListingOptions, SiftError> {
        let matcher = self.build_matcher()?;
        Ok(builder
            .file_type(FileType::All)
            .recursive(self.scope.is_recursive())
            .matcher(matcher)
            .build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::PathEntry;
    use crate::predicates::PathMatcher;

    #[test]
    fn scope_flags() {
        assert!(!SearchScope::CurrentDir.is_recursive());
        assert!(SearchScope::CurrentDir.is_current_dir());
        assert!(SearchScope::CurrentDirRecursively.is_recursive());
        assert!(SearchScope::CurrentDirRecursively.is_current_dir());
        assert!(SearchScope::RootDirRecursively.is_recursive());
        assert!(!SearchScope::RootDirRecursively.is_current_dir());
        assert_eq!(
            SearchScope::RootDirRecursively.to_string(),
            "Root Folder Recursively"
        );
    }

    #[test]
    fn resolve_picks_directory_by_scope() {
        let current = Path::new("/r/pics");
        let root = Path::new("/r");
        let opts = SearchOptions::new("x");
        assert_eq!(opts.resolve(current, root), current);
        let opts = opts.scope(SearchScope::RootDirRecursively);
        assert_eq!(opts.resolve(current, root), root);
    }

    #[test]
    fn equal_options_mean_same_search() {
        let a = SearchOptions::new("cat").method(MatchingMethod::Regex);
        let b = SearchOptions::new("cat").method(MatchingMethod::Regex);
        assert_eq!(a, b);
        assert_ne!(a, b.clone().scope(SearchScope::CurrentDir));
        assert_ne!(a, b.target(MatchingTarget::FullPath));
    }

    #[test]
    fn listing_options_carry_matcher_and_recursion() {
        let opts = SearchOptions::new("cat")
            .scope(SearchScope::CurrentDir)
            .listing_options(ListingOptionsBuilder::new().file_type(FileType::DirectoryOnly))
            .unwrap();
        assert!(!opts.recursive);
        assert_eq!(opts.file_type, FileType::All);
        let m = opts.matcher.unwrap();
        assert!(m.is_match(&PathEntry::file("/r/cat.jpg")));
        assert!(!m.is_match(&PathEntry::file("/r/dog.jpg")));
    }

    #[test]
    fn invalid_pattern_fails_before_listing() {
        let err = SearchOptions::new("(")
            .method(MatchingMethod::Regex)
            .listing_options(ListingOptionsBuilder::new())
            .unwrap_err();
        assert!(matches!(err, SiftError::InvalidPattern { .. }));
    }
}
