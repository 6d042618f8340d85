//! Sorted index: title- and author-ordered arrays searched by anchor-and-expand.
//!
//! # Anchor-and-expand
//!
//! This looks like a binary search but is not one. The narrowing step compares
//! the query against the midpoint key lexicographically, yet the hit test is
//! substring containment, and containment has no relationship to sort order.
//! So the search finds *an* anchor (if it is lucky), then scans outward from
//! it while neighbours still contain the query, stopping each direction at the
//! first miss.
//!
//! ```text
//! keys:   alpha | beta rust | gamma | rust book | zeta      query "rust"
//! probe:                      mid=2 miss, "rust" > "gamma" → go right
//! probe:                                  mid=3 hit  → anchor
//! expand: ←  gamma misses, stop         →  zeta misses, stop
//! result: [rust book]                  ("beta rust" is never seen)
//! ```
//!
//! Missing "beta rust" above is the accepted behavior, not a bug to fix. The
//! midpoint is `(lo + hi) / 2` over an inclusive range, and results come out
//! anchor first, then leftward neighbours, then rightward ones.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **KEYS_SORTED**: `by_title` and `by_author` are sorted by key
//! 2. **STABLE_TIES**: equal keys keep snapshot order
//! 3. **SAME_SNAPSHOT**: both arrays hold every snapshot record exactly once

use crate::types::{Record, RecordHandle, RecordRef};
use crate::utils::{is_blank_query, isbn_map, normalize, share_records, union_by_isbn};
use std::collections::HashMap;
use std::sync::Arc;

/// One slot of a sorted array: the lowercased field and whose it is.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SortedEntry {
    key: String,
    handle: RecordHandle,
}

/// Anchor-and-expand search over title- and author-sorted arrays.
#[derive(Debug, Clone, Default)]
pub struct SortedIndex {
    records: Vec<RecordRef>,
    by_title: Vec<SortedEntry>,
    by_author: Vec<SortedEntry>,
    by_isbn: HashMap<String, RecordRef>,
}

impl SortedIndex {
    /// Create an empty index. Searching it returns nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a record snapshot, replacing all previous state.
    pub fn build(&mut self, records: &[Record]) {
        self.build_shared(&share_records(records));
    }

    /// Rebuild from already-shared handles.
    pub fn build_shared(&mut self, records: &[RecordRef]) {
        let by_title = sorted_entries(records, |record| record.title.as_str());
        let by_author = sorted_entries(records, |record| record.author.as_str());

        *self = Self {
            records: records.to_vec(),
            by_title,
            by_author,
            by_isbn: isbn_map(records),
        };

        tracing::debug!(records = self.records.len(), "built sorted index");
    }

    /// Anchor-and-expand over titles. Ordered anchor, left run, right run.
    pub fn search_by_title(&self, query: &str) -> Vec<RecordRef> {
        self.anchor_and_expand(&self.by_title, query)
    }

    /// Anchor-and-expand over authors. Ordered anchor, left run, right run.
    pub fn search_by_author(&self, query: &str) -> Vec<RecordRef> {
        self.anchor_and_expand(&self.by_author, query)
    }

    /// Union of the title and author scans and the exact identifier match.
    ///
    /// Results are unique by identifier and sorted by it.
    pub fn search(&self, query: &str) -> Vec<RecordRef> {
        if is_blank_query(query) {
            return Vec::new();
        }
        let exact = self.by_isbn.get(query).cloned();
        union_by_isbn([
            self.search_by_title(query),
            self.search_by_author(query),
            exact.into_iter().collect(),
        ])
    }

    /// Records in title order.
    pub fn records_by_title(&self) -> Vec<RecordRef> {
        self.resolve(self.by_title.iter().map(|entry| entry.handle))
    }

    /// Number of records indexed.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn anchor_and_expand(&self, entries: &[SortedEntry], query: &str) -> Vec<RecordRef> {
        if is_blank_query(query) {
            return Vec::new();
        }
        let needle = normalize(query);
        let Some(anchor) = find_anchor(entries, &needle) else {
            return Vec::new();
        };

        let mut hits = vec![entries[anchor].handle];
        hits.extend(
            entries[..anchor]
                .iter()
                .rev()
                .take_while(|entry| entry.key.contains(needle.as_str()))
                .map(|entry| entry.handle),
        );
        hits.extend(
            entries[anchor + 1..]
                .iter()
                .take_while(|entry| entry.key.contains(needle.as_str()))
                .map(|entry| entry.handle),
        );
        self.resolve(hits)
    }

    fn resolve(&self, handles: impl IntoIterator<Item = RecordHandle>) -> Vec<RecordRef> {
        handles
            .into_iter()
            .map(|handle| Arc::clone(&self.records[handle.as_usize()]))
            .collect()
    }
}

/// Stable sort of the snapshot by one lowercased field.
fn sorted_entries<F>(records: &[RecordRef], field: F) -> Vec<SortedEntry>
where
    F: Fn(&Record) -> &str,
{
    let mut entries: Vec<SortedEntry> = records
        .iter()
        .enumerate()
        .map(|(i, record)| SortedEntry {
            key: normalize(field(&**record)),
            handle: RecordHandle::from(i),
        })
        .collect();
    entries.sort_by(|a, b| a.key.cmp(&b.key));
    entries
}

/// Narrow `[lo, hi)` by lexicographic comparison until a midpoint key
/// contains `needle`. Returns that midpoint, or `None` once the range is empty.
fn find_anchor(entries: &[SortedEntry], needle: &str) -> Option<usize> {
    let mut lo = 0usize;
    let mut hi = entries.len();
    while lo < hi {
        let mid = (lo + hi - 1) / 2;
        let key = entries[mid].key.as_str();
        if key.contains(needle) {
            return Some(mid);
        }
        if needle < key {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    None
}

/// Check that both arrays are sorted and cover the snapshot exactly once.
#[cfg(any(debug_assertions, test))]
#[allow(dead_code)]
pub fn check_sorted_index_well_formed(index: &SortedIndex) -> bool {
    fn sorted(entries: &[SortedEntry]) -> bool {
        entries.windows(2).all(|w| w[0].key <= w[1].key)
    }
    fn complete(entries: &[SortedEntry], len: usize) -> bool {
        let mut handles: Vec<usize> = entries.iter().map(|e| e.handle.as_usize()).collect();
        handles.sort_unstable();
        handles.into_iter().eq(0..len)
    }
    let len = index.records.len();
    sorted(&index.by_title)
        && sorted(&index.by_author)
        && complete(&index.by_title, len)
        && complete(&index.by_author, len)
}
