//! Concurrent memo of vertex-excluded path lengths.
//!
//! Entries live in a [`DashMap`]; recency is tracked in fixed-capacity LRU
//! shards so eviction stays bounded when many workers share one engine.

use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    num::NonZeroUsize,
    sync::{Mutex, MutexGuard, PoisonError},
};

use dashmap::DashMap;
use lru::LruCache;
use tracing::trace;

use crate::{
    error::GraphError,
    graph::{PathLength, PathMetric},
};

/// Capacity settings for the exclusion-path cache.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
///
/// use crowd_core::PathCacheConfig;
///
/// let config = PathCacheConfig::new(NonZeroUsize::new(512).expect("non-zero"));
/// assert_eq!(config.max_entries().get(), 512);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PathCacheConfig {
    max_entries: NonZeroUsize,
}

impl PathCacheConfig {
    /// Default number of path lengths retained before eviction.
    pub const DEFAULT_MAX_ENTRIES: NonZeroUsize = match NonZeroUsize::new(65_536) {
        Some(value) => value,
        None => NonZeroUsize::MIN,
    };

    /// Builds a configuration retaining at most `max_entries` lengths.
    #[must_use]
    pub fn new(max_entries: NonZeroUsize) -> Self {
        Self { max_entries }
    }

    /// Returns the entry limit.
    #[must_use]
    pub fn max_entries(&self) -> NonZeroUsize {
        self.max_entries
    }
}

impl Default for PathCacheConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_ENTRIES)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
struct PathKey {
    metric: PathMetric,
    source: usize,
    target: usize,
    excluded: usize,
}

const MAX_SHARDS: usize = 32;
const TARGET_ENTRIES_PER_SHARD: usize = 2048;

#[derive(Debug)]
pub(crate) struct PathCache {
    entries: DashMap<PathKey, PathLength>,
    shards: Vec<Mutex<LruCache<PathKey, ()>>>,
    config: PathCacheConfig,
}

impl PathCache {
    pub(crate) fn new(config: PathCacheConfig) -> Self {
        let shards = shard_capacities(config.max_entries.get())
            .into_iter()
            .map(|capacity| Mutex::new(LruCache::new(capacity)))
            .collect();
        Self {
            entries: DashMap::new(),
            shards,
            config,
        }
    }

    pub(crate) fn config(&self) -> PathCacheConfig {
        self.config
    }

    /// Returns the cached length or computes, stores and returns it.
    ///
    /// Errors from `compute` are passed through and never cached.
    pub(crate) fn get_or_compute(
        &self,
        metric: PathMetric,
        source: usize,
        target: usize,
        excluded: usize,
        compute: impl FnOnce() -> Result<PathLength, GraphError>,
    ) -> Result<PathLength, GraphError> {
        let key = PathKey {
            metric,
            source,
            target,
            excluded,
        };
        if let Some(length) = self.entries.get(&key).map(|entry| *entry) {
            self.touch(key);
            record_hit();
            return Ok(length);
        }
        record_miss();
        let length = compute()?;
        self.entries.insert(key, length);
        self.touch(key);
        Ok(length)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    fn touch(&self, key: PathKey) {
        if let Some((evicted, ())) = self.shard_for(&key).push(key, ()) {
            if evicted != key {
                self.entries.remove(&evicted);
                trace!(?evicted, "evicted cached path length");
                record_eviction();
            }
        }
    }

    fn shard_for(&self, key: &PathKey) -> MutexGuard<'_, LruCache<PathKey, ()>> {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        let slot = usize::try_from(hasher.finish() % self.shards.len() as u64).unwrap_or(0);
        // The usage list only orders keys; a panic mid-update leaves it usable.
        self.shards[slot]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

fn shard_capacities(total: usize) -> Vec<NonZeroUsize> {
    let count = total
        .div_ceil(TARGET_ENTRIES_PER_SHARD)
        .clamp(1, MAX_SHARDS)
        .min(total.max(1));
    let base = total / count;
    let remainder = total % count;
    (0..count)
        .filter_map(|index| NonZeroUsize::new(base + usize::from(index < remainder)))
        .collect()
}

#[cfg(feature = "metrics")]
fn record_hit() {
    metrics::counter!("crowd_path_cache_hits").increment(1);
}

#[cfg(not(feature = "metrics"))]
fn record_hit() {}

#[cfg(feature = "metrics")]
fn record_miss() {
    metrics::counter!("crowd_path_cache_misses").increment(1);
}

#[cfg(not(feature = "metrics"))]
fn record_miss() {}

#[cfg(feature = "metrics")]
fn record_eviction() {
    metrics::counter!("crowd_path_cache_evictions").increment(1);
}

#[cfg(not(feature = "metrics"))]
fn record_eviction() {}
