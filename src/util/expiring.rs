//! Idle-expiring collections used by the activity trackers.
//!
//! `TtlCache` is an id-keyed cache whose entries expire after a configurable
//! period without access; `ExpiringSet` is a set whose elements expire a fixed
//! period after insertion regardless of reads. Both sweep lazily during normal
//! operations, so no background eviction task is needed.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

struct CacheEntry<V> {
    value: V,
    last_access: Instant,
}

/// An id-keyed cache whose entries are evicted after `ttl` without access.
///
/// Reads and writes refresh an entry's access time. Expired entries are
/// removed lazily whenever the cache is touched; `is_empty`/`len` therefore
/// report the size net of anything that has already expired.
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: HashMap<K, CacheEntry<V>>,
}

impl<K: Eq + Hash, V> TtlCache<K, V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    fn sweep(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.entries
            .retain(|_, entry| now.saturating_duration_since(entry.last_access) < ttl);
    }

    /// Returns the cached value for `key`, inserting one built by `create` if
    /// absent. Refreshes the entry's access time.
    pub fn get_or_insert_with(&mut self, key: K, create: impl FnOnce() -> V) -> &mut V {
        let now = Instant::now();
        self.sweep(now);

        let entry = self.entries.entry(key).or_insert_with(|| CacheEntry {
            value: create(),
            last_access: now,
        });
        entry.last_access = now;
        &mut entry.value
    }

    /// Returns the cached value for `key` if present, refreshing its access time.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let now = Instant::now();
        self.sweep(now);

        let entry = self.entries.get_mut(key)?;
        entry.last_access = now;
        Some(&mut entry.value)
    }

    /// Removes and returns the value for `key`, if present.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.sweep(Instant::now());
        self.entries.remove(key).map(|entry| entry.value)
    }

    /// Iterates over all live values without refreshing their access times.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.sweep(Instant::now());
        self.entries.values_mut().map(|entry| &mut entry.value)
    }

    /// Estimated entry count, net of expired entries.
    pub fn len(&mut self) -> usize {
        self.sweep(Instant::now());
        self.entries.len()
    }

    /// Whether the cache holds no live entries.
    pub fn is_empty(&mut self) -> bool {
        self.len() == 0
    }
}

/// A set whose elements expire a fixed period after insertion.
///
/// Unlike [`TtlCache`], membership checks do not extend an element's
/// lifetime; the expiry clock starts at `add` and is never reset by reads.
pub struct ExpiringSet<T> {
    lifetime: Duration,
    entries: HashMap<T, Instant>,
}

impl<T: Eq + Hash> ExpiringSet<T> {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            lifetime,
            entries: HashMap::new(),
        }
    }

    fn sweep(&mut self, now: Instant) {
        let lifetime = self.lifetime;
        self.entries
            .retain(|_, added| now.saturating_duration_since(*added) < lifetime);
    }

    /// Adds `value` to the set, restarting its expiry clock if already present.
    pub fn add(&mut self, value: T) {
        let now = Instant::now();
        self.sweep(now);
        self.entries.insert(value, now);
    }

    /// Whether `value` is present and has not yet expired.
    pub fn contains(&mut self, value: &T) -> bool {
        self.sweep(Instant::now());
        self.entries.contains_key(value)
    }
}
