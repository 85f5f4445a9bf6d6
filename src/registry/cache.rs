use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;

use super::{DomainRegistry, RegistryOptions};
use crate::table::RegistryTables;
use crate::types::MAX_HOSTNAME_LEN;

/// Cache key: hostname as given, and whether unknown registries are allowed
type CacheKey = (String, bool);

/// A [`DomainRegistry`] with an LRU cache in front of it.
///
/// Callers that check the same few hosts over and over (every connection to
/// a pinned domain, say) skip the trie walk after the first lookup.
pub struct CachedRegistry {
    registry: Arc<DomainRegistry>,
    cache: Mutex<LruCache<CacheKey, usize>>,
}

impl CachedRegistry {
    /// Wrap an existing registry.
    pub fn new(registry: Arc<DomainRegistry>, cache_size: usize) -> Self {
        let cache_size = NonZeroUsize::new(cache_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            registry,
            cache: Mutex::new(LruCache::new(cache_size)),
        }
    }

    /// Build a registry and its cache from the same options.
    pub fn with_options(tables: RegistryTables, options: RegistryOptions) -> Self {
        let cache_size = options.cache_size;
        Self::new(
            Arc::new(DomainRegistry::with_options(tables, options)),
            cache_size,
        )
    }

    pub fn registry(&self) -> &Arc<DomainRegistry> {
        &self.registry
    }

    pub fn registry_length(&self, hostname: &str) -> usize {
        self.cached(hostname, false)
    }

    pub fn registry_length_allow_unknown_registries(&self, hostname: &str) -> usize {
        self.cached(hostname, true)
    }

    fn cached(&self, hostname: &str, allow_unknown: bool) -> usize {
        // Over-long names are rejected before any work is done; keep them
        // out of the cache.
        if hostname.len() > MAX_HOSTNAME_LEN {
            return 0;
        }

        let key = (hostname.to_string(), allow_unknown);
        let mut cache = self.cache.lock();
        if let Some(&len) = cache.get(&key) {
            return len;
        }

        let len = if allow_unknown {
            self.registry.registry_length_allow_unknown_registries(hostname)
        } else {
            self.registry.registry_length(hostname)
        };
        cache.put(key, len);
        len
    }

    /// Number of cached results.
    pub fn cached_len(&self) -> usize {
        self.cache.lock().len()
    }

    /// Clear the cache
    pub fn clear_cache(&self) {
        self.cache.lock().clear();
    }
}
