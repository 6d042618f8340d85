//! Token index: word → records containing that word.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **NON_EMPTY**: every indexed word maps to at least one record
//! 2. **UNIQUE_POSTINGS**: a record appears at most once per word, however
//!    often the word repeats in its title and author
//! 3. **BUILD_COMPLETE**: every token of every title and author is a key
//!
//! # Query semantics
//!
//! Query words narrow the result progressively (AND), with one asymmetry
//! that callers rely on: a query word missing from the index is skipped
//! rather than forcing an empty result. When an intersection runs dry, the
//! next known word starts the accumulator over.
//!
//! ```text
//! "data mining"   → {111,222} ∩ {222}      = {222}
//! "data zzz"      → {111,222}  (zzz skipped)
//! "structures bob" → {111} ∩ {222}       = {}
//! ```

use crate::types::{Record, RecordHandle, RecordRef};
use crate::utils::{is_blank_query, isbn_map, share_records, tokenize, union_by_isbn};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Inverted word index plus exact identifier lookup.
#[derive(Debug, Clone, Default)]
pub struct TokenIndex {
    records: Vec<RecordRef>,
    words: HashMap<String, HashSet<RecordHandle>>,
    by_isbn: HashMap<String, RecordRef>,
}

impl TokenIndex {
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
        let mut words: HashMap<String, HashSet<RecordHandle>> = HashMap::new();

        for (i, record) in records.iter().enumerate() {
            let handle = RecordHandle::from(i);
            for word in tokenize(&record.title)
                .into_iter()
                .chain(tokenize(&record.author))
            {
                words.entry(word).or_default().insert(handle);
            }
        }

        *self = Self {
            records: records.to_vec(),
            words,
            by_isbn: isbn_map(records),
        };

        tracing::debug!(
            records = self.records.len(),
            terms = self.words.len(),
            "built token index"
        );
    }

    /// Records containing every known query word, plus the record whose
    /// identifier equals the query exactly.
    ///
    /// Results are unique by identifier and sorted by it.
    pub fn search(&self, query: &str) -> Vec<RecordRef> {
        if is_blank_query(query) {
            return Vec::new();
        }

        let mut acc: HashSet<RecordHandle> = HashSet::new();
        for word in tokenize(query) {
            let Some(postings) = self.words.get(&word) else {
                continue;
            };
            if acc.is_empty() {
                acc = postings.clone();
            } else {
                acc.retain(|handle| postings.contains(handle));
            }
        }

        let word_hits: Vec<RecordRef> = acc
            .into_iter()
            .map(|handle| Arc::clone(&self.records[handle.as_usize()]))
            .collect();
        let exact = self.by_isbn.get(query).cloned();

        union_by_isbn([word_hits, exact.into_iter().collect()])
    }

    /// Records indexed under one word (already lowercased), unordered.
    pub fn records_for(&self, word: &str) -> Vec<RecordRef> {
        self.words
            .get(word)
            .map(|postings| {
                postings
                    .iter()
                    .map(|handle| Arc::clone(&self.records[handle.as_usize()]))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of records a word appears in.
    pub fn document_frequency(&self, word: &str) -> usize {
        self.words.get(word).map_or(0, HashSet::len)
    }

    /// Number of distinct words indexed.
    pub fn term_count(&self) -> usize {
        self.words.len()
    }

    /// Number of records indexed.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Check that a token index agrees with the snapshot it was built from.
#[cfg(any(debug_assertions, test))]
#[allow(dead_code)]
pub fn check_token_index_well_formed(index: &TokenIndex, records: &[RecordRef]) -> bool {
    if index.records.len() != records.len() {
        return false;
    }

    for (word, postings) in &index.words {
        if postings.is_empty() {
            return false;
        }
        for handle in postings {
            let Some(record) = records.get(handle.as_usize()) else {
                return false;
            };
            let in_title = tokenize(&record.title).iter().any(|w| w == word);
            let in_author = tokenize(&record.author).iter().any(|w| w == word);
            if !in_title && !in_author {
                return false;
            }
        }
    }

    records.iter().enumerate().all(|(i, record)| {
        tokenize(&record.title)
            .iter()
            .chain(tokenize(&record.author).iter())
            .all(|word| {
                index
                    .words
                    .get(word)
                    .is_some_and(|postings| postings.contains(&RecordHandle::from(i)))
            })
    })
}
