//! The building blocks shared by every index.
//!
//! A [`Record`] is one catalog entry. Indexes never own records outright: a
//! build wraps each snapshot record in an `Arc` once, and every index built
//! from that snapshot shares the same handles. Search results hand those
//! handles back out, so a result is never a deep copy.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **Record identity**: two records are "the same" iff their `isbn` fields
//!   are equal. Deduplication across strategies keys on this and nothing else.
//!
//! - **Strategy tags**: the accepted tags are exactly `prefix`, `token`,
//!   `sorted` and `hybrid`. Anything else is an `InvalidArgument`, never a
//!   silent fallback.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

// =============================================================================
// RECORDS
// =============================================================================

/// One catalog entry, as handed over by the catalog.
///
/// `available` belongs to the catalog's borrow bookkeeping. Indexes carry it
/// along because they hold snapshot copies, but they never match on it and
/// never change it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    /// Unique identifier (an ISBN in practice). Exact lookups are
    /// case-sensitive against this value.
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub year: i32,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

impl Record {
    pub fn new(
        isbn: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
    ) -> Self {
        Self {
            isbn: isbn.into(),
            title: title.into(),
            author: author.into(),
            year,
            available: true,
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {} ({})", self.title, self.author, self.year)
    }
}

/// Shared handle to a snapshot record.
pub type RecordRef = Arc<Record>;

/// Position of a record inside the snapshot an index was built from.
///
/// The trie stores these instead of references so nodes stay plain data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct RecordHandle(pub u32);

impl RecordHandle {
    /// Convert to usize for slice indexing.
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl From<usize> for RecordHandle {
    fn from(index: usize) -> Self {
        RecordHandle(index as u32)
    }
}

// =============================================================================
// STRATEGIES
// =============================================================================

/// Which index answers a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Character trie over lowercased titles and authors.
    Prefix,
    /// Inverted word index with AND semantics across query words.
    Token,
    /// Anchor-and-expand over title- and author-sorted arrays.
    Sorted,
    /// Union of the three above.
    Hybrid,
}

impl Strategy {
    /// Every strategy, in the order reports list them.
    pub const ALL: [Strategy; 4] = [
        Strategy::Prefix,
        Strategy::Token,
        Strategy::Sorted,
        Strategy::Hybrid,
    ];

    /// Lowercase tag, as accepted by `FromStr`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Prefix => "prefix",
            Strategy::Token => "token",
            Strategy::Sorted => "sorted",
            Strategy::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "prefix" => Ok(Strategy::Prefix),
            "token" => Ok(Strategy::Token),
            "sorted" => Ok(Strategy::Sorted),
            "hybrid" => Ok(Strategy::Hybrid),
            other => Err(Error::InvalidArgument(format!(
                "unknown search strategy '{}' (expected prefix, token, sorted or hybrid)",
                other
            ))),
        }
    }
}

// =============================================================================
// BUILD OPTIONS
// =============================================================================

/// Knobs for [`SearchCoordinator`](crate::SearchCoordinator) builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOptions {
    /// Build the three sub-indexes concurrently. Ignored without the
    /// `parallel` feature. Output is identical either way.
    pub parallel: bool,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            parallel: cfg!(feature = "parallel"),
        }
    }
}
