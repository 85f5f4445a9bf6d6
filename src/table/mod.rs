//! Compiled registry tables.
//!
//! The trie is stored as three flat arrays:
//!
//! - a string table of NUL-terminated labels, addressed by byte offset;
//! - a node array of [`TrieNode`] records, where siblings are contiguous and
//!   sorted by label, and the first `num_root_children` entries are the
//!   top-level labels;
//! - a leaf table of string table offsets, used for the children of nodes
//!   whose children have no children of their own. Most public suffix rules
//!   are of this shape, and a bare offset is far smaller than a node record.
//!
//! A node's children live in the leaf table when its `first_child_offset` is
//! at or above `leaf_node_table_offset`.
//!
//! Tables are taken as-is: nothing is checked when they are constructed.
//! Every accessor is bounds-checked instead and returns `None` for an offset
//! that does not resolve.

#[cfg(feature = "json")]
mod loader;

#[cfg(feature = "json")]
pub use loader::TableSet;

use std::borrow::Cow;

use crate::types::{LeafNode, TrieNode};

/// Immutable compiled trie.
#[derive(Debug, Clone)]
pub struct RegistryTables {
    string_table: Cow<'static, [u8]>,
    nodes: Cow<'static, [TrieNode]>,
    num_root_children: usize,
    leaf_nodes: Cow<'static, [LeafNode]>,
    leaf_node_table_offset: usize,
}

impl RegistryTables {
    /// Build tables from owned or `'static` data.
    pub fn new(
        string_table: impl Into<Cow<'static, [u8]>>,
        nodes: impl Into<Cow<'static, [TrieNode]>>,
        num_root_children: usize,
        leaf_nodes: impl Into<Cow<'static, [LeafNode]>>,
        leaf_node_table_offset: usize,
    ) -> Self {
        Self {
            string_table: string_table.into(),
            nodes: nodes.into(),
            num_root_children,
            leaf_nodes: leaf_nodes.into(),
            leaf_node_table_offset,
        }
    }

    /// Build tables from data compiled into the binary.
    pub const fn from_static(
        string_table: &'static [u8],
        nodes: &'static [TrieNode],
        num_root_children: usize,
        leaf_nodes: &'static [LeafNode],
        leaf_node_table_offset: usize,
    ) -> Self {
        Self {
            string_table: Cow::Borrowed(string_table),
            nodes: Cow::Borrowed(nodes),
            num_root_children,
            leaf_nodes: Cow::Borrowed(leaf_nodes),
            leaf_node_table_offset,
        }
    }

    /// Tables with no rules at all.
    pub const fn empty() -> Self {
        Self::from_static(b"\0", &[], 0, &[], 0)
    }

    /// Whether `node`'s children are stored in the leaf table.
    #[inline]
    pub fn has_leaf_children(&self, node: &TrieNode) -> bool {
        node.first_child_offset as usize >= self.leaf_node_table_offset
    }

    /// Label stored at `offset`, without its terminator.
    pub fn label_at(&self, offset: usize) -> Option<&[u8]> {
        let rest = self.string_table.get(offset..)?;
        let len = rest.iter().position(|&b| b == 0)?;
        Some(&rest[..len])
    }

    /// Top-level nodes.
    pub fn root_children(&self) -> Option<&[TrieNode]> {
        self.nodes.get(..self.num_root_children)
    }

    /// Children of a node whose children are full nodes.
    pub fn node_children(&self, node: &TrieNode) -> Option<&[TrieNode]> {
        let start = node.first_child_offset as usize;
        self.nodes.get(start..start + node.num_children as usize)
    }

    /// Children of a node whose children are in the leaf table.
    pub fn leaf_children(&self, node: &TrieNode) -> Option<&[LeafNode]> {
        let start = (node.first_child_offset as usize).checked_sub(self.leaf_node_table_offset)?;
        self.leaf_nodes.get(start..start + node.num_children as usize)
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_root_children(&self) -> usize {
        self.num_root_children
    }

    pub fn num_leaf_nodes(&self) -> usize {
        self.leaf_nodes.len()
    }

    pub fn leaf_node_table_offset(&self) -> usize {
        self.leaf_node_table_offset
    }

    pub fn string_table_len(&self) -> usize {
        self.string_table.len()
    }
}

impl Default for RegistryTables {
    fn default() -> Self {
        Self::empty()
    }
}
