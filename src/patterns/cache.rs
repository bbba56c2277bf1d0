// patterns/cache.rs
use crate::error::SiftError;
use lru::LruCache;
use once_cell::sync::Lazy;
use regex::Regex;
use std::{
    num::NonZeroUsize,
    sync::{Mutex, MutexGuard, PoisonError},
};

const MAX_CACHE_SIZE: NonZeroUsize = match NonZeroUsize::new(256) {
    Some(n) => n,
    None => unreachable!(),
};

/// Metrics for cache performance monitoring
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheMetrics {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
}

impl CacheMetrics {
    /// Calculates the cache hit ratio
    pub fn hit_ratio(&self) -> f64 {
        if self.hits + self.misses == 0 {
            0.0
        } else {
            self.hits as f64 / (self.hits + self.misses) as f64
        }
    }
}

/// Compiled regexes keyed by pattern text
///
/// Only compiled patterns live here. Compilation is pure, so a hit is
/// indistinguishable from a fresh compile.
struct RegexCache {
    cache: Mutex<LruCache<String, Regex>>,
    metrics: Mutex<CacheMetrics>,
}

impl RegexCache {
    fn new() -> Self {
        Self {
            cache: Mutex::new(LruCache::new(MAX_CACHE_SIZE)),
            metrics: Mutex::new(CacheMetrics::default()),
        }
    }

    fn lock_cache(&self) -> MutexGuard<'_, LruCache<String, Regex>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_metrics(&self) -> MutexGuard<'_, CacheMetrics> {
        self.metrics.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn get(&self, key: &str) -> Option<Regex> {
        let hit = self.lock_cache().get(key).cloned();
        let mut metrics = self.lock_metrics();
        if hit.is_some() {
            metrics.hits += 1;
        } else {
            metrics.misses += 1;
        }
        hit
    }

    fn put(&self, key: String, value: Regex) {
        let mut cache = self.lock_cache();
        cache.put(key, value);
        self.lock_metrics().size = cache.len();
    }

    fn metrics(&self) -> CacheMetrics {
        self.lock_metrics().clone()
    }

    fn clear(&self) {
        self.lock_cache().clear();
        *self.lock_metrics() = CacheMetrics::default();
    }
}

static REGEX_CACHE: Lazy<RegexCache> = Lazy::new(RegexCache::new);

/// Retrieves a compiled Regex from cache or compiles and caches it
///
/// # Errors
///
/// Returns `SiftError::InvalidPattern` when `pat` is not a valid regex
pub fn get_or_compile_regex(pat: &str) -> Result<Regex, SiftError> {
    if let Some(cached) = REGEX_CACHE.get(pat) {
        return Ok(cached);
    }

    let re = Regex::new(pat).map_err(|e| SiftError::invalid_pattern(pat, e))?;
    REGEX_CACHE.put(pat.to_string(), re.clone());
    Ok(re)
}

/// Returns metrics for the regex cache
pub fn cache_metrics() -> CacheMetrics {
    REGEX_CACHE.metrics()
}

/// Empties the regex cache and resets its metrics
pub fn clear_cache() {
    REGEX_CACHE.clear();
}
