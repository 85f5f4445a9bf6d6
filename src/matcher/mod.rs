//! Label matching against one level of the trie.
//!
//! Both lookups follow the public suffix list precedence for a single
//! level: an exact label wins; otherwise a `*` sibling matches any label,
//! unless a `!label` sibling marks this label as an exception to it.

mod search;

use crate::fault::{check, fault, FaultHandler};
use crate::table::RegistryTables;
use crate::types::{is_valid_label, TrieNode, EXCEPTION_MARKER, MAX_HOSTNAME_LEN, WILDCARD_LABEL};

use search::{find_in_range, CorruptRange};

/// How a label matched at one trie level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Match<T> {
    /// A sibling with exactly this label
    Exact(T),
    /// A `!label` sibling overriding a `*` sibling
    Exception(T),
    /// The `*` sibling
    Wildcard(T),
}

impl<T> Match<T> {
    pub fn get(&self) -> &T {
        match self {
            Match::Exact(t) | Match::Exception(t) | Match::Wildcard(t) => t,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Match::Exact(t) | Match::Exception(t) | Match::Wildcard(t) => t,
        }
    }

    pub fn is_exception(&self) -> bool {
        matches!(self, Match::Exception(_))
    }
}

/// Find `label` among the children of `parent`, or among the top-level
/// nodes when `parent` is `None`.
///
/// `parent` must not keep its children in the leaf table; use
/// [`find_leaf`] for those.
pub fn find_node<'t>(
    tables: &'t RegistryTables,
    faults: &dyn FaultHandler,
    label: &[u8],
    parent: Option<&TrieNode>,
) -> Option<Match<&'t TrieNode>> {
    if !is_valid_label(label) {
        return None;
    }

    let siblings = match parent {
        None => tables.root_children(),
        Some(parent) => {
            if !check!(faults, !tables.has_leaf_children(parent)) {
                return None;
            }
            tables.node_children(parent)
        }
    };
    let Some(siblings) = siblings else {
        fault!(faults, "node children lie within the node table");
        return None;
    };

    resolve(label, |target| {
        find_in_range(siblings, target, faults, |node: &'t TrieNode| {
            tables.label_at(node.string_table_offset as usize)
        })
        .map(|found| found.map(|(node, _)| node))
    })
}

/// Find `label` among the leaf-table children of `parent`, returning the
/// matched label as stored in the string table.
pub fn find_leaf<'t>(
    tables: &'t RegistryTables,
    faults: &dyn FaultHandler,
    label: &[u8],
    parent: &TrieNode,
) -> Option<Match<&'t [u8]>> {
    if !check!(faults, tables.has_leaf_children(parent)) {
        return None;
    }
    if !is_valid_label(label) {
        return None;
    }

    let Some(leaves) = tables.leaf_children(parent) else {
        fault!(faults, "leaf children lie within the leaf table");
        return None;
    };

    resolve(label, |target| {
        find_in_range(leaves, target, faults, |&offset| {
            tables.label_at(offset as usize)
        })
        .map(|found| found.map(|(_, stored)| stored))
    })
}

/// Applies exact > exception > wildcard precedence. A corrupt range stops
/// the search at the first lookup that hits it.
fn resolve<T>(
    label: &[u8],
    mut find: impl FnMut(&[u8]) -> Result<Option<T>, CorruptRange>,
) -> Option<Match<T>> {
    if let Some(exact) = find(label).ok()? {
        return Some(Match::Exact(exact));
    }

    let wildcard = find(WILDCARD_LABEL).ok()??;

    let mut buf = [0u8; MAX_HOSTNAME_LEN + 1];
    let exception = match exception_label(label, &mut buf) {
        Some(exception) => find(exception).ok()?,
        None => None,
    };

    Some(match exception {
        Some(exception) => Match::Exception(exception),
        None => Match::Wildcard(wildcard),
    })
}

/// Writes `!label` into `buf`.
fn exception_label<'b>(label: &[u8], buf: &'b mut [u8]) -> Option<&'b [u8]> {
    let len = label.len() + 1;
    let out = buf.get_mut(..len)?;
    out[0] = EXCEPTION_MARKER;
    out[1..].copy_from_slice(label);
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fault::{Fault, LogOnFault};
    use crate::types::LeafNode;
    use parking_lot::Mutex;

    // Top level: bar -> {!foo, *, qux}, jp (leaves: !city, *, ac), uk -> {co, *} as nodes
    //
    // offsets: bar 0, jp 4, uk 7, !foo 10, foo 15, * 19, qux 21,
    //          !city 25, city 31, ac 36, co 39
    const STRINGS: &[u8] = b"bar\0jp\0uk\0!foo\0foo\0*\0qux\0!city\0city\0ac\0co\0";
    const NODES: &[TrieNode] = &[
        TrieNode::new(0, 3, 3, false), // bar
        TrieNode::new(4, 8, 3, true),  // jp, leaf children
        TrieNode::new(7, 6, 2, true),  // uk
        TrieNode::new(10, 0, 0, true), // bar: !foo
        TrieNode::new(19, 0, 0, true), // bar: *
        TrieNode::new(21, 0, 0, true), // bar: qux
        TrieNode::new(19, 0, 0, true), // uk: *
        TrieNode::new(39, 0, 0, true), // uk: co
    ];
    const LEAVES: &[LeafNode] = &[25, 19, 36];

    fn tables() -> RegistryTables {
        RegistryTables::from_static(STRINGS, NODES, 3, LEAVES, 8)
    }

    fn label(tables: &RegistryTables, node: &TrieNode) -> Vec<u8> {
        tables
            .label_at(node.string_table_offset as usize)
            .unwrap()
            .to_vec()
    }

    #[test]
    fn test_root_exact_match() {
        let t = tables();
        let m = find_node(&t, &LogOnFault, b"uk", None).unwrap();
        assert!(matches!(m, Match::Exact(_)));
        assert_eq!(label(&t, m.get()), b"uk");
    }

    #[test]
    fn test_root_no_match() {
        let t = tables();
        assert!(find_node(&t, &LogOnFault, b"com", None).is_none());
        assert!(find_node(&t, &LogOnFault, b"", None).is_none());
        assert!(find_node(&t, &LogOnFault, b"!uk", None).is_none());
    }

    #[test]
    fn test_exact_beats_wildcard() {
        let t = tables();
        let bar = find_node(&t, &LogOnFault, b"bar", None).unwrap().into_inner();
        let m = find_node(&t, &LogOnFault, b"qux", Some(bar)).unwrap();
        assert!(matches!(m, Match::Exact(_)));
        assert_eq!(label(&t, m.get()), b"qux");
    }

    #[test]
    fn test_wildcard_match() {
        let t = tables();
        let bar = find_node(&t, &LogOnFault, b"bar", None).unwrap().into_inner();
        let m = find_node(&t, &LogOnFault, b"baz", Some(bar)).unwrap();
        assert!(matches!(m, Match::Wildcard(_)));
        assert_eq!(label(&t, m.get()), b"*");
    }

    #[test]
    fn test_exception_beats_wildcard() {
        let t = tables();
        let bar = find_node(&t, &LogOnFault, b"bar", None).unwrap().into_inner();
        let m = find_node(&t, &LogOnFault, b"foo", Some(bar)).unwrap();
        assert!(m.is_exception());
        assert_eq!(label(&t, m.get()), b"!foo");
    }

    #[test]
    fn test_leaf_matches() {
        let t = tables();
        let jp = find_node(&t, &LogOnFault, b"jp", None).unwrap().into_inner();

        assert_eq!(find_leaf(&t, &LogOnFault, b"ac", jp), Some(Match::Exact(&b"ac"[..])));
        assert_eq!(
            find_leaf(&t, &LogOnFault, b"osaka", jp),
            Some(Match::Wildcard(&b"*"[..]))
        );
        assert_eq!(
            find_leaf(&t, &LogOnFault, b"city", jp),
            Some(Match::Exception(&b"!city"[..]))
        );
        assert_eq!(find_leaf(&t, &LogOnFault, b"", jp), None);
    }

    #[test]
    fn test_leaf_without_wildcard() {
        const STRINGS: &[u8] = b"jp\0ac\0co\0";
        const NODES: &[TrieNode] = &[TrieNode::new(0, 1, 2, true)];
        const LEAVES: &[LeafNode] = &[3, 6];
        let t = RegistryTables::from_static(STRINGS, NODES, 1, LEAVES, 1);
        let jp = &t.root_children().unwrap()[0];

        assert_eq!(find_leaf(&t, &LogOnFault, b"co", jp), Some(Match::Exact(&b"co"[..])));
        assert_eq!(find_leaf(&t, &LogOnFault, b"ne", jp), None);
    }

    #[test]
    fn test_wrong_tier_faults() {
        let t = tables();
        let seen = Mutex::new(Vec::new());
        let handler = |f: &Fault| seen.lock().push(f.condition);

        let jp = find_node(&t, &handler, b"jp", None).unwrap().into_inner();
        let uk = find_node(&t, &handler, b"uk", None).unwrap().into_inner();

        assert!(find_node(&t, &handler, b"ac", Some(jp)).is_none());
        assert!(find_leaf(&t, &handler, b"co", uk).is_none());

        let seen = seen.into_inner();
        assert_eq!(seen.len(), 2);
        assert!(seen[0].contains("has_leaf_children"));
    }

    #[test]
    fn test_corrupt_child_range_faults() {
        const NODES: &[TrieNode] = &[TrieNode::new(0, 0, 9, true)];
        let t = RegistryTables::from_static(b"uk\0", NODES, 1, &[], 1);
        let seen = Mutex::new(0);
        let handler = |_: &Fault| *seen.lock() += 1;

        let uk = find_node(&t, &handler, b"uk", None).unwrap().into_inner();
        assert!(find_node(&t, &handler, b"co", Some(uk)).is_none());
        assert_eq!(seen.into_inner(), 1);
    }

    #[test]
    fn test_corrupt_label_faults_once() {
        // The second top-level node points outside the string table
        const NODES: &[TrieNode] = &[
            TrieNode::new(0, 0, 0, true),
            TrieNode::new(100, 0, 0, true),
        ];
        const LEAVES: &[LeafNode] = &[0, 100];
        const PARENT: TrieNode = TrieNode::new(0, 2, 2, true);
        let t = RegistryTables::from_static(b"*\0", NODES, 2, LEAVES, 2);
        let seen = Mutex::new(0);
        let handler = |_: &Fault| *seen.lock() += 1;

        assert!(find_node(&t, &handler, b"com", None).is_none());
        assert_eq!(*seen.lock(), 1);

        assert!(find_leaf(&t, &handler, b"com", &PARENT).is_none());
        assert_eq!(*seen.lock(), 2);
    }

    #[test]
    fn test_exception_label_buffer() {
        let mut buf = [0u8; 8];
        assert_eq!(exception_label(b"foo", &mut buf), Some(&b"!foo"[..]));
        assert_eq!(exception_label(b"toolongx", &mut buf), None);
    }
}
