//! Search coordinator: one snapshot, three indexes, one dispatch point.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   SearchCoordinator                          │
//! │            RwLock<Arc<IndexSet>>  (current snapshot)         │
//! ├─────────────────┬─────────────────┬─────────────────────────┤
//! │  PrefixIndex    │  TokenIndex     │     SortedIndex         │
//! │  (tries)        │  (word → set)   │     (anchor-and-expand) │
//! └─────────────────┴─────────────────┴─────────────────────────┘
//! ```
//!
//! # Build-then-swap
//!
//! `build` assembles a complete new [`IndexSet`] without touching the current
//! one, then swaps the `Arc` under a short write lock. A search clones the
//! current `Arc` under a read lock and runs lock-free against it, so it sees
//! either the old set or the new one, never a mixture. Concurrent searches
//! share one immutable set and never block each other.
//!
//! With the `parallel` feature the three sub-indexes build concurrently:
//!
//! ```text
//! snapshot ──┬──► PrefixIndex ──┐
//!            ├──► TokenIndex  ──┼──► IndexSet ──► swap
//!            └──► SortedIndex ──┘      (rayon::join)
//! ```

use crate::error::Result;
use crate::inverted::TokenIndex;
use crate::prefix::PrefixIndex;
use crate::sorted::SortedIndex;
use crate::types::{IndexOptions, Record, RecordRef, Strategy};
use crate::utils::{share_records, union_by_isbn};
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Instant;

/// The three indexes built from one snapshot.
#[derive(Debug, Clone, Default)]
pub struct IndexSet {
    pub prefix: PrefixIndex,
    pub token: TokenIndex,
    pub sorted: SortedIndex,
}

impl IndexSet {
    /// Build every index from one shared snapshot.
    pub fn build(records: &[RecordRef], options: IndexOptions) -> Self {
        if options.parallel {
            Self::build_parallel(records)
        } else {
            Self::build_sequential(records)
        }
    }

    fn build_sequential(records: &[RecordRef]) -> Self {
        let mut set = Self::default();
        set.prefix.build_shared(records);
        set.token.build_shared(records);
        set.sorted.build_shared(records);
        set
    }

    #[cfg(feature = "parallel")]
    fn build_parallel(records: &[RecordRef]) -> Self {
        let (prefix, (token, sorted)) = rayon::join(
            || {
                let mut prefix = PrefixIndex::new();
                prefix.build_shared(records);
                prefix
            },
            || {
                rayon::join(
                    || {
                        let mut token = TokenIndex::new();
                        token.build_shared(records);
                        token
                    },
                    || {
                        let mut sorted = SortedIndex::new();
                        sorted.build_shared(records);
                        sorted
                    },
                )
            },
        );
        Self {
            prefix,
            token,
            sorted,
        }
    }

    /// Sequential fallback for builds without rayon.
    #[cfg(not(feature = "parallel"))]
    fn build_parallel(records: &[RecordRef]) -> Self {
        Self::build_sequential(records)
    }

    /// Run one strategy against this set.
    pub fn search(&self, query: &str, strategy: Strategy) -> Vec<RecordRef> {
        match strategy {
            Strategy::Prefix => self.prefix.search(query),
            Strategy::Token => self.token.search(query),
            Strategy::Sorted => self.sorted.search(query),
            Strategy::Hybrid => union_by_isbn([
                self.prefix.search(query),
                self.token.search(query),
                self.sorted.search(query),
            ]),
        }
    }

    /// Number of records in the snapshot.
    pub fn len(&self) -> usize {
        self.prefix.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefix.is_empty()
    }
}

/// Owns the current [`IndexSet`] and dispatches queries to it.
///
/// Starts empty: searching before the first `build` returns nothing.
#[derive(Debug, Default)]
pub struct SearchCoordinator {
    current: RwLock<Arc<IndexSet>>,
    options: IndexOptions,
}

impl SearchCoordinator {
    /// Create an empty coordinator with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty coordinator with explicit options.
    pub fn with_options(options: IndexOptions) -> Self {
        Self {
            current: RwLock::new(Arc::new(IndexSet::default())),
            options,
        }
    }

    /// Rebuild all three indexes from `records` and swap them in.
    ///
    /// Records with a blank identifier, and repeats of an identifier already
    /// seen, are skipped with a warning. The previous set stays visible to
    /// searches until the swap.
    pub fn build(&self, records: &[Record]) {
        let start = Instant::now();
        let shared = share_records(records);
        let next = Arc::new(IndexSet::build(&shared, self.options));
        *self.current.write() = next;
        tracing::info!(
            records = shared.len(),
            skipped = records.len() - shared.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "rebuilt search indexes"
        );
    }

    /// Search with a strategy tag: `prefix`, `token`, `sorted` or `hybrid`.
    ///
    /// An unknown tag is an `InvalidArgument` error. A query that matches
    /// nothing is an empty result.
    pub fn search(&self, query: &str, strategy: &str) -> Result<Vec<RecordRef>> {
        let strategy: Strategy = strategy.parse()?;
        Ok(self.search_with(query, strategy))
    }

    /// Search with an already-parsed strategy.
    pub fn search_with(&self, query: &str, strategy: Strategy) -> Vec<RecordRef> {
        self.snapshot().search(query, strategy)
    }

    /// The index set searches currently run against.
    pub fn snapshot(&self) -> Arc<IndexSet> {
        Arc::clone(&self.current.read())
    }

    /// Number of records in the current snapshot.
    pub fn len(&self) -> usize {
        self.current.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.read().is_empty()
    }
}
