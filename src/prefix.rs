//! Prefix index: character tries over lowercased titles and authors.
//!
//! # Layout
//!
//! ```text
//!   root (no matches)
//!    └─ 'd' [111, 222]
//!        └─ 'a' [111, 222]
//!            └─ 't' [111, 222]
//!                └─ 'a' [111, 222]
//!                    ├─ ' ' ─ 's' ... [111]     "data structures"
//!                    └─ ' ' ─ 'm' ... [222]     "data mining"
//! ```
//!
//! Nodes live in one arena per trie and refer to each other by [`NodeId`].
//! Every node past the root caches the handles of all records whose text runs
//! through it, so a prefix lookup is a walk of `query.len()` steps followed by
//! reading one list. The price is memory: total characters times average
//! overlap.
//!
//! The root is never appended to, which is why an empty query has nothing to
//! return here. The blank-query rule makes that explicit for every strategy.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **ROOT_EMPTY**: `nodes[0].matches` is always empty
//! 2. **PATH_CACHE**: a handle is in a node's `matches` iff that record's
//!    normalized field starts with the node's path string
//! 3. **ARENA_OWNED**: node ids only point into their own trie's arena

use crate::types::{Record, RecordHandle, RecordRef};
use crate::utils::{is_blank_query, isbn_map, normalize, share_records, union_by_isbn};
use std::collections::HashMap;
use std::sync::Arc;

/// Index of a node inside its trie's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    const ROOT: NodeId = NodeId(0);

    #[inline]
    fn as_usize(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Default)]
struct TrieNode {
    children: HashMap<char, NodeId>,
    /// Records whose normalized text passes through this node.
    matches: Vec<RecordHandle>,
    /// Some record's text ends exactly here.
    terminal: bool,
}

/// Arena-backed character trie.
#[derive(Debug, Clone)]
struct Trie {
    nodes: Vec<TrieNode>,
}

impl Default for Trie {
    fn default() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
        }
    }
}

impl Trie {
    fn insert(&mut self, text: &str, handle: RecordHandle) {
        let mut node = NodeId::ROOT;
        for ch in text.chars() {
            node = match self.nodes[node.as_usize()].children.get(&ch) {
                Some(&child) => child,
                None => {
                    let child = NodeId(self.nodes.len() as u32);
                    self.nodes.push(TrieNode::default());
                    self.nodes[node.as_usize()].children.insert(ch, child);
                    child
                }
            };
            self.nodes[node.as_usize()].matches.push(handle);
        }
        self.nodes[node.as_usize()].terminal = true;
    }

    /// Walk `prefix`; `None` as soon as a character has no child.
    fn find(&self, prefix: &str) -> Option<&TrieNode> {
        let mut node = NodeId::ROOT;
        for ch in prefix.chars() {
            node = *self.nodes[node.as_usize()].children.get(&ch)?;
        }
        Some(&self.nodes[node.as_usize()])
    }

    /// True if some inserted string is exactly `text`.
    fn contains(&self, text: &str) -> bool {
        self.find(text).is_some_and(|node| node.terminal)
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }
}

/// Prefix search over titles and authors, plus exact identifier lookup.
#[derive(Debug, Clone, Default)]
pub struct PrefixIndex {
    records: Vec<RecordRef>,
    title_trie: Trie,
    author_trie: Trie,
    by_isbn: HashMap<String, RecordRef>,
}

impl PrefixIndex {
    /// Create an empty index. Searching it returns nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a record snapshot, replacing all previous state.
    pub fn build(&mut self, records: &[Record]) {
        self.build_shared(&share_records(records));
    }

    /// Rebuild from already-shared handles.
    ///
    /// The new tries are assembled first and swapped in at the end, so the
    /// index is never left half-populated.
    pub fn build_shared(&mut self, records: &[RecordRef]) {
        let mut title_trie = Trie::default();
        let mut author_trie = Trie::default();

        for (i, record) in records.iter().enumerate() {
            let handle = RecordHandle::from(i);
            title_trie.insert(&normalize(&record.title), handle);
            author_trie.insert(&normalize(&record.author), handle);
        }

        *self = Self {
            records: records.to_vec(),
            title_trie,
            author_trie,
            by_isbn: isbn_map(records),
        };

        tracing::debug!(
            records = self.records.len(),
            title_nodes = self.title_trie.len(),
            author_nodes = self.author_trie.len(),
            "built prefix index"
        );
    }

    /// Records whose lowercased title or author starts with the lowercased
    /// query, plus the record whose identifier equals the query exactly.
    ///
    /// Results are unique by identifier and sorted by it.
    pub fn search(&self, query: &str) -> Vec<RecordRef> {
        if is_blank_query(query) {
            return Vec::new();
        }
        let needle = normalize(query);

        let title_hits = self.lookup(&self.title_trie, &needle);
        let author_hits = self.lookup(&self.author_trie, &needle);
        let exact = self.by_isbn.get(query).cloned();

        union_by_isbn([title_hits, author_hits, exact.into_iter().collect()])
    }

    /// True if some record's lowercased title is exactly `title` (lowercased).
    pub fn has_title(&self, title: &str) -> bool {
        self.title_trie.contains(&normalize(title))
    }

    /// True if some record's lowercased author is exactly `author` (lowercased).
    pub fn has_author(&self, author: &str) -> bool {
        self.author_trie.contains(&normalize(author))
    }

    /// Number of records indexed.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total trie nodes across both tries, roots included.
    pub fn node_count(&self) -> usize {
        self.title_trie.len() + self.author_trie.len()
    }

    fn lookup(&self, trie: &Trie, needle: &str) -> Vec<RecordRef> {
        trie.find(needle)
            .map(|node| {
                node.matches
                    .iter()
                    .map(|handle| Arc::clone(&self.records[handle.as_usize()]))
                    .collect()
            })
            .unwrap_or_default()
    }
}
