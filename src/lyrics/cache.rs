//! Parsed timeline cache
//!
//! Switching back and forth between the lyrics records of a song should not
//! re-parse the same content. Entries are keyed by a SHA-1 fingerprint of the
//! resolved format and the content.

use super::{LyricsFormat, Timeline};
use lru::LruCache;
use sha1::{Digest, Sha1};
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::debug;

pub struct TimelineCache {
    entries: LruCache<String, Arc<Timeline>>,
    hits: u64,
    misses: u64,
}

impl TimelineCache {
    pub const DEFAULT_CAPACITY: usize = 16;

    /// A zero capacity is bumped to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Return the cached timeline for this content, parsing it on a miss.
    pub fn get_or_parse(&mut self, content: &str, format: LyricsFormat) -> Arc<Timeline> {
        let format = format.resolve(content);
        let key = fingerprint(content, format);

        if let Some(timeline) = self.entries.get(&key) {
            self.hits += 1;
            return Arc::clone(timeline);
        }

        self.misses += 1;
        let timeline = Arc::new(format.parse(content));
        debug!(key = %&key[..12], lines = timeline.len(), "cached parsed lyrics");
        self.entries.put(key, Arc::clone(&timeline));
        timeline
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(hits, misses)` since creation.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for TimelineCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

fn fingerprint(content: &str, format: LyricsFormat) -> String {
    let mut hasher = Sha1::new();
    hasher.update(format.as_str().as_bytes());
    hasher.update([0u8]);
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}
