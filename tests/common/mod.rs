//! Test fixtures: compiles public suffix rules into registry tables.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap, VecDeque};

use domain_registry_r::{
    DomainRegistry, LeafNode, LogOnFault, RegistryOptions, RegistryTables, TableSet, TrieNode,
};

#[derive(Default)]
struct RuleNode {
    children: BTreeMap<Vec<u8>, RuleNode>,
    terminal: bool,
}

/// Whether childless subtrees go to the leaf table or stay as full nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    WithLeaves,
    NodesOnly,
}

/// Compile rules such as `com`, `co.uk`, `*.uk`, `!city.kawasaki.jp`.
pub fn compile(rules: &[&str], layout: Layout) -> TableSet {
    let mut root = RuleNode::default();
    for rule in rules {
        let mut node = &mut root;
        for label in rule.split('.').rev() {
            node = node.children.entry(label.as_bytes().to_vec()).or_default();
        }
        node.terminal = true;
    }

    let mut strings = StringTable::default();
    let mut nodes: Vec<TrieNode> = Vec::new();
    let mut leaves: Vec<LeafNode> = Vec::new();
    let mut leaf_parents = Vec::new();
    let mut queue = VecDeque::new();

    for (label, child) in &root.children {
        queue.push_back((nodes.len(), child));
        nodes.push(TrieNode::new(strings.offset(label), 0, 0, child.terminal));
    }

    while let Some((idx, node)) = queue.pop_front() {
        if node.children.is_empty() {
            continue;
        }
        nodes[idx].num_children = node.children.len() as u16;

        let all_childless = node.children.values().all(|c| c.children.is_empty());
        if layout == Layout::WithLeaves && all_childless {
            nodes[idx].first_child_offset = leaves.len() as u32;
            leaf_parents.push(idx);
            for label in node.children.keys() {
                leaves.push(strings.offset(label) as LeafNode);
            }
        } else {
            nodes[idx].first_child_offset = nodes.len() as u32;
            for (label, child) in &node.children {
                queue.push_back((nodes.len(), child));
                nodes.push(TrieNode::new(strings.offset(label), 0, 0, child.terminal));
            }
        }
    }

    let leaf_node_table_offset = nodes.len();
    for idx in leaf_parents {
        nodes[idx].first_child_offset += leaf_node_table_offset as u32;
    }

    TableSet {
        string_table: strings.finish(),
        nodes,
        num_root_children: root.children.len(),
        leaf_nodes: leaves,
        leaf_node_table_offset,
    }
}

#[derive(Default)]
struct StringTable {
    bytes: Vec<u8>,
    offsets: HashMap<Vec<u8>, u32>,
}

impl StringTable {
    /// Offset of `label`, appending it on first use. Exception labels are
    /// stored as `!label\0label\0`.
    fn offset(&mut self, label: &[u8]) -> u32 {
        if let Some(&offset) = self.offsets.get(label) {
            return offset;
        }
        let offset = self.bytes.len() as u32;
        self.bytes.extend_from_slice(label);
        self.bytes.push(0);
        if let Some(base) = label.strip_prefix(b"!") {
            self.bytes.extend_from_slice(base);
            self.bytes.push(0);
        }
        self.offsets.insert(label.to_vec(), offset);
        offset
    }

    fn finish(self) -> String {
        String::from_utf8(self.bytes).expect("rules are ASCII")
    }
}

pub fn tables(rules: &[&str], layout: Layout) -> RegistryTables {
    compile(rules, layout)
        .into_tables()
        .expect("compiled tables are valid")
}

/// Registry that logs faults instead of aborting.
pub fn registry(rules: &[&str], layout: Layout) -> DomainRegistry {
    DomainRegistry::with_options(
        tables(rules, layout),
        RegistryOptions::new().with_fault_handler(LogOnFault),
    )
}

/// A slice of the public suffix list, including wildcard and exception
/// rules at several depths.
pub const SAMPLE_RULES: &[&str] = &[
    "com",
    "net",
    "org",
    "uk",
    "co.uk",
    "ltd.uk",
    "ac.uk",
    "jp",
    "ac.jp",
    "tokyo.jp",
    "kawasaki.jp",
    "*.kawasaki.jp",
    "!city.kawasaki.jp",
    "ck",
    "*.ck",
    "!www.ck",
    "blogspot.com",
    "appspot.com",
    "github.io",
    "io",
    "*.compute.amazonaws.com",
    "us-east-1.amazonaws.com",
    "s3.us-east-1.amazonaws.com",
];
