// patterns/text.rs
use super::cache;
use crate::error::SiftError;
use globset::{Glob, GlobMatcher};
use regex::Regex;

/// A matcher over a single string
///
/// Immutable once built. Equality is structural: two matchers are equal when
/// they are the same variant built from the same pattern text.
#[derive(Clone, Debug)]
pub enum TextMatcher {
    /// Literal, case-sensitive substring test
    Substring(String),
    /// Regex search: matches if the regex is found anywhere in the input
    Regex(Regex),
    /// Glob test against the whole input
    Glob(GlobMatcher),
}

impl TextMatcher {
    /// Builds a substring matcher; never fails
    pub fn substring(pattern: impl Into<String>) -> Self {
        TextMatcher::Substring(pattern.into())
    }

    /// Builds a regex matcher
    ///
    /// # Errors
    ///
    /// Returns `SiftError::InvalidPattern` if `pattern` is not a valid regex
    pub fn regex(pattern: &str) -> Result<Self, SiftError> {
        cache::get_or_compile_regex(pattern).map(TextMatcher::Regex)
    }

    /// Builds a glob matcher (`*`, `?`, `[...]`, `{a,b}`)
    ///
    /// # Errors
    ///
    /// Returns `SiftError::InvalidPattern` if `pattern` is not a valid glob
    pub fn glob(pattern: &str) -> Result<Self, SiftError> {
        let glob = Glob::new(pattern).map_err(|e| SiftError::invalid_pattern(pattern, e))?;
        Ok(TextMatcher::Glob(glob.compile_matcher()))
    }

    /// The pattern text this matcher was built from
    pub fn pattern(&self) -> &str {
        match self {
            TextMatcher::Substring(p) => p,
            TextMatcher::Regex(re) => re.as_str(),
            TextMatcher::Glob(g) => g.glob().glob(),
        }
    }

    pub fn is_match(&self, candidate: &str) -> bool {
        match self {
            TextMatcher::Substring(p) => candidate.contains(p.as_str()),
            TextMatcher::Regex(re) => re.is_match(candidate),
            TextMatcher::Glob(g) => g.is_match(candidate),
        }
    }
}

impl PartialEq for TextMatcher {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TextMatcher::Substring(a), TextMatcher::Substring(b)) => a == b,
            (TextMatcher::Regex(a), TextMatcher::Regex(b)) => a.as_str() == b.as_str(),
            (TextMatcher::Glob(a), TextMatcher::Glob(b)) => a.glob() == b.glob(),
            _ => false,
        }
    }
}

impl Eq for TextMatcher {}
