//! Tagged Cache
//!
//! An in-process read cache where every entry carries a set of tags. Writes
//! invalidate by tag rather than by key, so all views of a record can be
//! dropped together.
//!
//! Read-through fills take a [`TaggedCache::generation`] before loading and
//! hand it back to [`TaggedCache::insert_if_current`]; a fill that raced an
//! invalidation is discarded.

use std::{
    hash::Hash,
    sync::atomic::{AtomicU64, Ordering},
    time::{Duration, Instant},
};

use dashmap::DashMap;
use smallvec::SmallVec;

/// Tags attached to a cache entry.
pub type Tags = SmallVec<[String; 2]>;

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    tags: Tags,
    expires_at: Instant,
}

/// Concurrent cache with per-entry expiry and tag-based invalidation.
#[derive(Debug)]
pub struct TaggedCache<K, V>
where
    K: Eq + Hash,
{
    entries: DashMap<K, Entry<V>>,
    ttl: Duration,
    generation: AtomicU64,
}

impl<K, V> TaggedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            generation: AtomicU64::new(0),
        }
    }

    /// Return a live entry, evicting it if it has expired.
    pub fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();

        {
            let entry = self.entries.get(key)?;

            if entry.expires_at > now {
                return Some(entry.value.clone());
            }
        }

        self.entries.remove_if(key, |_key, entry| entry.expires_at <= now);

        None
    }

    pub fn insert(&self, key: K, value: V, tags: Tags) {
        self.entries.insert(
            key,
            Entry {
                value,
                tags,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Bumped by every invalidation.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Store a value loaded after `seen` was read from [`Self::generation`],
    /// unless an invalidation happened since. Returns whether it was kept.
    pub fn insert_if_current(&self, key: K, value: V, tags: Tags, seen: u64) -> bool {
        if self.generation() != seen {
            return false;
        }

        self.insert(key.clone(), value, tags);

        // Invalidation bumps the generation before it sweeps.
        if self.generation() != seen {
            self.entries.remove(&key);

            return false;
        }

        true
    }

    /// Drop every entry carrying `tag`.
    pub fn invalidate_tag(&self, tag: &str) {
        self.generation.fetch_add(1, Ordering::AcqRel);

        self.entries
            .retain(|_key, entry| !entry.tags.iter().any(|t| t == tag));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
