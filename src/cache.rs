//! Compiled pattern caching.

use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

use crate::error::BuildError;
use crate::formatter::DateTimeFormatter;

/// A least-recently-used cache of compiled patterns.
///
/// The cache is owned by the caller; wrap it in a `Mutex` to share it
/// between threads. Formatters are handed out behind an `Arc` so a cached
/// entry can be evicted while still in use.
#[derive(Debug)]
pub struct PatternCache {
    entries: LruCache<String, Arc<DateTimeFormatter>>,
}

impl PatternCache {
    pub fn new(capacity: NonZeroUsize) -> Self {
        PatternCache {
            entries: LruCache::new(capacity),
        }
    }

    /// Get or compile a pattern, using the cache.
    pub fn get_or_compile(&mut self, pattern: &str) -> Result<Arc<DateTimeFormatter>, BuildError> {
        if let Some(formatter) = self.entries.get(pattern) {
            return Ok(Arc::clone(formatter));
        }

        trace!("compiling uncached pattern {pattern:?}");
        let formatter = Arc::new(DateTimeFormatter::of_pattern(pattern)?);
        self.entries.put(pattern.to_string(), Arc::clone(&formatter));
        Ok(formatter)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
