//! Bounded reply cache keyed by normalized utterance

use lru::LruCache;
use std::num::NonZeroUsize;

/// LRU cache of replies for simple turns
#[derive(Debug)]
pub struct ResponseCache {
    entries: LruCache<String, String>,
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(crate::CACHE_CAPACITY)
    }
}

impl ResponseCache {
    /// Capacity below 1 is raised to 1
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
        }
    }

    /// Lower-cased, trimmed key
    pub fn normalize(utterance: &str) -> String {
        utterance.trim().to_lowercase()
    }

    /// Look up a reply, marking the entry as recently used
    pub fn get(&mut self, utterance: &str) -> Option<String> {
        self.entries.get(&Self::normalize(utterance)).cloned()
    }

    pub fn insert(&mut self, utterance: &str, reply: impl Into<String>) {
        self.entries.put(Self::normalize(utterance), reply.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
