//! Cached descriptor-label resolution.

use mesh_trees::{branches, TreeNumber};
use parking_lot::RwLock;
use tracing::warn;

use crate::cache::LabelCache;
use crate::config::EnricherConfig;
use crate::statistics::ResolverStats;
use crate::traits::MeshQueryable;

/// Resolves the descriptor label at a tree position, memoizing answers.
///
/// Definitive answers (a label, or "no descriptor here") go into the
/// [`LabelCache`]; failed queries do not, so a transient outage never
/// pins an empty label for the rest of the run.
///
/// ```ignore
/// let resolver = DescriptorResolver::new(&service, &config);
/// let label = resolver.resolve(&TreeNumber::from_token("C18"));
/// ```
pub struct DescriptorResolver<'a> {
    service: &'a dyn MeshQueryable,
    cache: LabelCache,
    branch_fallback: bool,
    stats: RwLock<ResolverStats>,
}

impl<'a> DescriptorResolver<'a> {
    /// Creates a resolver over `service`, sized per `config`.
    pub fn new(service: &'a dyn MeshQueryable, config: &EnricherConfig) -> Self {
        Self {
            service,
            cache: LabelCache::new(config.cache.clone()),
            branch_fallback: config.branch_fallback,
            stats: RwLock::new(ResolverStats::default()),
        }
    }

    /// The label at `tree`, or an empty string when none can be found.
    pub fn resolve(&self, tree: &TreeNumber) -> String {
        if let Some(cached) = self.cache.get(tree) {
            self.stats.write().cache_hits += 1;
            return match cached {
                Some(label) => label,
                None => self.fallback_label(tree),
            };
        }

        self.stats.write().cache_misses += 1;
        match self.service.descriptor_label_at(tree) {
            Ok(Some(label)) => {
                self.cache.insert(tree.clone(), Some(label.clone()));
                label
            }
            Ok(None) => {
                self.cache.insert(tree.clone(), None);
                self.fallback_label(tree)
            }
            Err(error) => {
                self.stats.write().query_failures += 1;
                warn!("{error}");
                self.fallback_label(tree)
            }
        }
    }

    /// The label cache, mainly for inspection in tests.
    pub fn cache(&self) -> &LabelCache {
        &self.cache
    }

    /// A snapshot of the resolver counters.
    pub fn stats(&self) -> ResolverStats {
        *self.stats.read()
    }

    fn fallback_label(&self, tree: &TreeNumber) -> String {
        if !self.branch_fallback {
            return String::new();
        }
        match tree.branch().and_then(branches::label) {
            Some(label) => {
                self.stats.write().branch_fallbacks += 1;
                label.to_string()
            }
            None => String::new(),
        }
    }
}
