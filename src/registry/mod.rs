//! Registry length resolution.
//!
//! A [`DomainRegistry`] owns a set of compiled tables and the fault policy
//! used while searching them. It is immutable once built and can be shared
//! across threads.

mod cache;
mod domain;

pub use cache::CachedRegistry;

use std::fmt;
use std::sync::Arc;

use crate::fault::{check, AbortOnFault, FaultHandler};
use crate::hostname::{HostnamePart, HostnameParts, NormalizedHost, SEPARATOR};
use crate::matcher::{find_leaf, find_node, Match};
use crate::table::RegistryTables;
use crate::types::TrieNode;

/// Default LRU cache size
pub const DEFAULT_CACHE_SIZE: usize = 1024;

/// Registry builder options.
#[derive(Clone)]
pub struct RegistryOptions {
    /// Receives internal invariant violations
    pub fault_handler: Arc<dyn FaultHandler>,
    /// LRU cache size. Only [`CachedRegistry`] reads it; a bare
    /// [`DomainRegistry`] has no cache.
    pub cache_size: usize,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            fault_handler: Arc::new(AbortOnFault),
            cache_size: DEFAULT_CACHE_SIZE,
        }
    }
}

impl fmt::Debug for RegistryOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryOptions")
            .field("cache_size", &self.cache_size)
            .finish_non_exhaustive()
    }
}

impl RegistryOptions {
    /// Create new registry options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fault handler.
    pub fn with_fault_handler(mut self, handler: impl FaultHandler + 'static) -> Self {
        self.fault_handler = Arc::new(handler);
        self
    }

    /// Set cache size.
    pub fn with_cache_size(mut self, size: usize) -> Self {
        self.cache_size = size;
        self
    }
}

/// Public suffix lookups over one set of compiled tables.
pub struct DomainRegistry {
    tables: RegistryTables,
    faults: Arc<dyn FaultHandler>,
}

impl fmt::Debug for DomainRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomainRegistry")
            .field("nodes", &self.tables.num_nodes())
            .field("leaf_nodes", &self.tables.num_leaf_nodes())
            .finish_non_exhaustive()
    }
}

impl DomainRegistry {
    /// Create a registry that aborts on internal faults.
    pub fn new(tables: RegistryTables) -> Self {
        Self::with_options(tables, RegistryOptions::default())
    }

    /// Create a registry with the given fault handler. `cache_size` is
    /// ignored here; use [`CachedRegistry::with_options`] for a cached one.
    pub fn with_options(tables: RegistryTables, options: RegistryOptions) -> Self {
        Self {
            tables,
            faults: options.fault_handler,
        }
    }

    pub fn tables(&self) -> &RegistryTables {
        &self.tables
    }

    /// Length in bytes of the public suffix at the end of `hostname`.
    ///
    /// Returns 0 for invalid hostnames (non-ASCII, longer than 255 bytes) and
    /// for hostnames with no known suffix. A single trailing dot is not
    /// counted, so `example.com.` and `example.com` both give 3.
    pub fn registry_length(&self, hostname: &str) -> usize {
        self.lookup(hostname, false)
    }

    /// Like [`registry_length`](Self::registry_length), but a rightmost label
    /// with no rule at all is treated as a suffix of its own, so that new or
    /// unlisted top-level domains still resolve.
    pub fn registry_length_allow_unknown_registries(&self, hostname: &str) -> usize {
        self.lookup(hostname, true)
    }

    fn lookup(&self, hostname: &str, allow_unknown: bool) -> usize {
        let Some(host) = NormalizedHost::new(hostname) else {
            return 0;
        };
        let len = self.registry_length_impl(host.as_bytes(), allow_unknown);
        log::trace!(
            "registry length of {:?} (allow unknown: {}): {}",
            hostname,
            allow_unknown,
            len
        );
        len
    }

    fn registry_length_impl(&self, buf: &[u8], allow_unknown: bool) -> usize {
        let end = buf.len();
        let start = buf.iter().position(|&b| b != SEPARATOR).unwrap_or(end);

        let mut registry = self.find_registry(buf, start, end);
        if registry.is_none() && allow_unknown {
            // The rightmost label has no rule at all (not even a wildcard):
            // treat it as an unknown but valid registry.
            registry = HostnameParts::new(buf, start, end, SEPARATOR)
                .next()
                .filter(|root| {
                    find_node(&self.tables, self.faults.as_ref(), root.label, None).is_none()
                })
                .map(|root| root.offset);
        }
        let Some(registry) = registry else {
            return 0;
        };

        let suffix_end = if end > start && buf[end - 1] == SEPARATOR {
            end - 1
        } else {
            end
        };
        if !check!(self.faults, registry >= start && registry < suffix_end) {
            return 0;
        }
        suffix_end - registry
    }

    /// Walk the hostname right to left and return the offset where the
    /// longest matching suffix starts.
    fn find_registry(&self, buf: &[u8], start: usize, end: usize) -> Option<usize> {
        let faults = self.faults.as_ref();
        let mut parts = HostnameParts::new(buf, start, end, SEPARATOR);
        let mut current: Option<&TrieNode> = None;
        let mut last_valid = None;

        while let Some(part) = parts.next() {
            let Some(matched) = find_node(&self.tables, faults, part.label, current) else {
                break;
            };
            let node = *matched.get();

            // An intermediate node only routes to deeper rules; it is not a
            // suffix by itself.
            last_valid = node.is_terminal.then(|| registry_offset(&matched, part));

            if self.tables.has_leaf_children(node) {
                let Some(part) = parts.next() else {
                    break;
                };
                let Some(leaf) = find_leaf(&self.tables, faults, part.label, node) else {
                    break;
                };
                return Some(registry_offset(&leaf, part));
            }

            current = Some(node);
        }

        last_valid
    }
}

/// Start of the registry implied by a match on `part`. An exception rule
/// stops the wildcard one level up, so the registry starts at the label to
/// the right of `part`.
fn registry_offset<T>(matched: &Match<T>, part: HostnamePart<'_>) -> usize {
    if matched.is_exception() {
        part.offset + part.label.len() + 1
    } else {
        part.offset
    }
}
