//! Loading compiled tables from a JSON artifact.
//!
//! The artifact is produced by whatever tool compiles the public suffix
//! list; this crate only reads it. The layout mirrors [`RegistryTables`]:
//!
//! ```json
//! {
//!   "string_table": "com\u0000uk\u0000co\u0000",
//!   "nodes": [
//!     { "string_table_offset": 0, "first_child_offset": 0, "num_children": 0, "is_terminal": true },
//!     { "string_table_offset": 4, "first_child_offset": 2, "num_children": 1, "is_terminal": true }
//!   ],
//!   "num_root_children": 2,
//!   "leaf_nodes": [7],
//!   "leaf_node_table_offset": 2
//! }
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::RegistryTables;
use crate::error::{RegistryError, Result, TableErrorKind};
use crate::types::{LeafNode, TrieNode};

/// Serialized form of [`RegistryTables`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSet {
    pub string_table: String,
    pub nodes: Vec<TrieNode>,
    pub num_root_children: usize,
    #[serde(default)]
    pub leaf_nodes: Vec<LeafNode>,
    pub leaf_node_table_offset: usize,
}

impl TableSet {
    /// Cheap structural checks on the artifact as a whole.
    ///
    /// Per-offset consistency is not checked here; lookups handle it.
    pub fn validate(&self) -> Result<()> {
        if self.num_root_children > self.nodes.len() {
            return Err(RegistryError::invalid_table(
                TableErrorKind::RootOutOfRange,
                format!(
                    "{} root children but only {} nodes",
                    self.num_root_children,
                    self.nodes.len()
                ),
            ));
        }

        if self.leaf_node_table_offset < self.nodes.len() {
            return Err(RegistryError::invalid_table(
                TableErrorKind::LeafOffsetOverlap,
                format!(
                    "leaf table offset {} overlaps {} nodes",
                    self.leaf_node_table_offset,
                    self.nodes.len()
                ),
            ));
        }

        let has_rules = !self.nodes.is_empty() || !self.leaf_nodes.is_empty();
        if has_rules && !self.string_table.ends_with('\0') {
            return Err(RegistryError::invalid_table(
                TableErrorKind::UnterminatedStringTable,
                "string table must end with NUL",
            ));
        }

        Ok(())
    }

    pub fn into_tables(self) -> Result<RegistryTables> {
        self.validate()?;
        let tables = RegistryTables::new(
            self.string_table.into_bytes(),
            self.nodes,
            self.num_root_children,
            self.leaf_nodes,
            self.leaf_node_table_offset,
        );
        log::debug!(
            "Loaded registry tables: {} nodes ({} root), {} leaves, {} string bytes",
            tables.num_nodes(),
            tables.num_root_children(),
            tables.num_leaf_nodes(),
            tables.string_table_len()
        );
        Ok(tables)
    }
}

impl RegistryTables {
    /// Load tables from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let set: TableSet = serde_json::from_str(json)?;
        set.into_tables()
    }

    /// Load tables from a JSON reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let set: TableSet = serde_json::from_reader(reader)?;
        set.into_tables()
    }

    /// Load tables from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }
}
