//! Descriptor label memo cache.
//!
//! Caches the outcome of descriptor-at-position lookups for the life of a
//! run, negative outcomes included: a position known to carry no
//! descriptor is answered without another query. Thread-safe behind a
//! `parking_lot::RwLock`.

use std::num::NonZeroUsize;

use lru::LruCache;
use mesh_trees::TreeNumber;
use parking_lot::RwLock;

use crate::config::CacheConfig;

/// Thread-safe memo cache for descriptor label lookups.
///
/// Keys are tree positions; values are completed lookup outcomes, where
/// `None` records "no descriptor at this position". Entries live until the
/// cache is dropped or the capacity bound evicts the least recently
/// inserted ones, which a normal run never reaches.
///
/// # Example
///
/// ```ignore
/// use mesh_trees::TreeNumber;
/// use mesh_trees_enricher::{CacheConfig, LabelCache};
///
/// let cache = LabelCache::new(CacheConfig::default());
/// let tree = TreeNumber::from_token("C18");
///
/// cache.insert(tree.clone(), Some("Nutritional and Metabolic Diseases".into()));
/// assert_eq!(
///     cache.get(&tree),
///     Some(Some("Nutritional and Metabolic Diseases".into()))
/// );
/// ```
pub struct LabelCache {
    inner: RwLock<LruCache<TreeNumber, Option<String>>>,
}

impl LabelCache {
    /// Creates a cache with the given configuration.
    pub fn new(config: CacheConfig) -> Self {
        Self::with_capacity(config.max_entries)
    }

    /// Creates a cache bounded to `max_entries` positions.
    pub fn with_capacity(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries.max(1)).unwrap();
        Self {
            inner: RwLock::new(LruCache::new(capacity)),
        }
    }

    /// Looks up a memoized outcome.
    ///
    /// The outer `Option` distinguishes "never looked up" from the inner
    /// memoized outcome, which itself may be the negative `None`.
    pub fn get(&self, tree: &TreeNumber) -> Option<Option<String>> {
        self.inner.read().peek(tree).cloned()
    }

    /// Memoizes a completed lookup outcome.
    ///
    /// The first completed lookup wins: if another outcome was stored for
    /// the position in the meantime, it is kept and this one is dropped.
    pub fn insert(&self, tree: TreeNumber, label: Option<String>) {
        let mut cache = self.inner.write();
        if !cache.contains(&tree) {
            cache.put(tree, label);
        }
    }

    /// Number of memoized positions.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Whether nothing has been memoized yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops all memoized outcomes.
    pub fn clear(&self) {
        self.inner.write().clear();
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        let cache = self.inner.read();
        let total = cache.len();
        let negative = cache.iter().filter(|(_, label)| label.is_none()).count();

        CacheStats {
            total_entries: total,
            negative_entries: negative,
            positive_entries: total - negative,
        }
    }
}

impl std::fmt::Debug for LabelCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stats = self.stats();
        f.debug_struct("LabelCache")
            .field("entries", &stats.total_entries)
            .field("negative", &stats.negative_entries)
            .finish()
    }
}

/// Statistics about the cache state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Total number of memoized positions.
    pub total_entries: usize,
    /// Positions memoized as "no descriptor found".
    pub negative_entries: usize,
    /// Positions memoized with a label.
    pub positive_entries: usize,
}
