use serde::{Deserialize, Serialize};

/// RFCs 1035 and 1123 cap a hostname at 255 bytes.
pub const MAX_HOSTNAME_LEN: usize = 255;

/// Label that matches any single hostname component.
pub const WILDCARD_LABEL: &[u8] = b"*";

/// Leading byte of an exception label (`!foo` cancels `*` for `foo`).
pub const EXCEPTION_MARKER: u8 = b'!';

/// Entry of the leaf table: a string table offset.
pub type LeafNode = u16;

/// A compiled trie node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrieNode {
    /// Offset of this node's label in the string table
    pub string_table_offset: u32,
    /// Index of the first child in the node array, or, at or above the leaf
    /// threshold, in the leaf table (after subtracting the threshold)
    pub first_child_offset: u32,
    /// Number of children; children are sorted by label
    pub num_children: u16,
    /// Whether the path ending at this node is a complete rule
    pub is_terminal: bool,
}

impl TrieNode {
    pub const fn new(
        string_table_offset: u32,
        first_child_offset: u32,
        num_children: u16,
        is_terminal: bool,
    ) -> Self {
        Self {
            string_table_offset,
            first_child_offset,
            num_children,
            is_terminal,
        }
    }
}

/// Whether a label can take part in matching: empty labels and labels that
/// begin with the exception marker never come from a valid hostname.
#[inline]
pub fn is_valid_label(label: &[u8]) -> bool {
    !label.is_empty() && !is_exception_label(label)
}

#[inline]
pub(crate) fn is_exception_label(label: &[u8]) -> bool {
    label.first() == Some(&EXCEPTION_MARKER)
}
