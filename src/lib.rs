//! Domain Registry - public suffix lookups for Rust
//!
//! This library answers one question about a hostname: how many bytes at its
//! end form a registered public suffix (`co.uk` in `www.example.co.uk`).
//! Trust decisions use the answer to tell whether two hosts belong to the
//! same registrable domain.
//!
//! Rules are read from compiled tables (see [`table`]): a string table, a
//! sorted node array and a compact leaf table, searched with binary search.
//! Compiling those tables from the public suffix list is left to a separate
//! build step.
//!
//! # Example
//!
//! ```rust
//! use domain_registry_r::{DomainRegistry, LeafNode, RegistryTables, TrieNode};
//!
//! // Rules: com, *.uk, co.uk
//! static STRINGS: &[u8] = b"com\0uk\0*\0co\0";
//! static NODES: &[TrieNode] = &[
//!     TrieNode::new(0, 0, 0, true),  // com
//!     TrieNode::new(4, 2, 2, false), // uk, children in the leaf table
//! ];
//! static LEAVES: &[LeafNode] = &[7, 9]; // *, co
//!
//! let registry = DomainRegistry::new(RegistryTables::from_static(STRINGS, NODES, 2, LEAVES, 2));
//!
//! assert_eq!(registry.registry_length("example.com"), 3);
//! assert_eq!(registry.registry_length("www.example.co.uk"), 5);
//! assert_eq!(registry.registry_length("example.anything.uk"), 11);
//! assert_eq!(registry.registry_length("example.zzz"), 0);
//! assert_eq!(registry.registry_length_allow_unknown_registries("example.zzz"), 3);
//! assert_eq!(registry.registrable_domain("www.example.co.uk"), Some("example.co.uk"));
//! ```
//!
//! # Matching Rules
//!
//! | Rule | Example | Effect |
//! |------|---------|--------|
//! | Label | `co.uk` | The exact name is a suffix |
//! | Wildcard | `*.uk` | Any single label under `uk` is a suffix |
//! | Exception | `!city.kawasaki.jp` | Cancels the wildcard for `city`; the suffix stops at `kawasaki.jp` |
//!
//! Hostnames are matched case-insensitively. A trailing dot is ignored.
//! Non-ASCII input and names longer than 255 bytes give 0.

pub mod error;
pub mod fault;
pub mod global;
pub mod hostname;
pub mod matcher;
pub mod registry;
pub mod table;
pub mod types;

// Re-export commonly used items
pub use error::{RegistryError, Result, TableErrorKind};
pub use fault::{AbortOnFault, Fault, FaultHandler, LogOnFault};
pub use global::{
    install, installed, load_tables, registry_length, registry_length_allow_unknown_registries,
    reset_tables,
};
pub use hostname::{HostnamePart, HostnameParts, NormalizedHost};
pub use matcher::Match;
pub use registry::{CachedRegistry, DomainRegistry, RegistryOptions, DEFAULT_CACHE_SIZE};
#[cfg(feature = "json")]
pub use table::TableSet;
pub use table::RegistryTables;
pub use types::{LeafNode, TrieNode, MAX_HOSTNAME_LEN};
