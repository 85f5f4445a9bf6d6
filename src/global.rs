//! Process-wide registry.
//!
//! Applications that compile their tables into the binary usually load them
//! once at start-up and look hostnames up from anywhere afterwards. Install
//! and reset take a write lock, so they must not be mixed with lookups
//! that are expected to see a particular table set; in practice install
//! happens once, before any lookup.

use std::borrow::Cow;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::registry::DomainRegistry;
use crate::table::RegistryTables;
use crate::types::{LeafNode, TrieNode};

static INSTALLED: Lazy<RwLock<Option<Arc<DomainRegistry>>>> = Lazy::new(|| RwLock::new(None));

/// Install tables for process-wide lookups, with the default (abort) fault
/// policy.
pub fn load_tables(
    string_table: impl Into<Cow<'static, [u8]>>,
    nodes: impl Into<Cow<'static, [TrieNode]>>,
    num_root_children: usize,
    leaf_nodes: impl Into<Cow<'static, [LeafNode]>>,
    leaf_node_table_offset: usize,
) {
    let tables = RegistryTables::new(
        string_table,
        nodes,
        num_root_children,
        leaf_nodes,
        leaf_node_table_offset,
    );
    install(DomainRegistry::new(tables));
}

/// Install a fully configured registry for process-wide lookups.
pub fn install(registry: DomainRegistry) {
    log::debug!(
        "Installing domain registry: {} nodes ({} root), {} leaves",
        registry.tables().num_nodes(),
        registry.tables().num_root_children(),
        registry.tables().num_leaf_nodes()
    );
    *INSTALLED.write() = Some(Arc::new(registry));
}

/// Remove the process-wide registry. Meant for test isolation.
pub fn reset_tables() {
    log::debug!("Resetting domain registry");
    *INSTALLED.write() = None;
}

/// The process-wide registry, if one is installed.
pub fn installed() -> Option<Arc<DomainRegistry>> {
    INSTALLED.read().clone()
}

fn with_installed(f: impl FnOnce(&DomainRegistry) -> usize) -> usize {
    let guard = INSTALLED.read();
    match guard.as_deref() {
        Some(registry) => f(registry),
        None => {
            log::warn!("Domain registry lookup before any tables were loaded");
            0
        }
    }
}

/// [`DomainRegistry::registry_length`] against the installed registry.
///
/// Returns 0 for `None`, invalid or unmatched hostnames, and when nothing is
/// installed.
pub fn registry_length(hostname: Option<&str>) -> usize {
    match hostname {
        Some(hostname) => with_installed(|r| r.registry_length(hostname)),
        None => 0,
    }
}

/// [`DomainRegistry::registry_length_allow_unknown_registries`] against the
/// installed registry.
pub fn registry_length_allow_unknown_registries(hostname: Option<&str>) -> usize {
    match hostname {
        Some(hostname) => with_installed(|r| r.registry_length_allow_unknown_registries(hostname)),
        None => 0,
    }
}
