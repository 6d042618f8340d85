//! In-memory catalog search with three interchangeable index strategies.
//!
//! A catalog is a list of [`Record`]s (identifier, title, author, year). The
//! crate builds three indexes over one snapshot of it and answers queries
//! through any of them, or through all three at once.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐   snapshot()   ┌──────────────────────────────────────┐
//! │  catalog.rs │───────────────▶│            hybrid.rs                 │
//! │  (Library,  │                │  SearchCoordinator                   │
//! │   borrow)   │                │    RwLock<Arc<IndexSet>>             │
//! └─────────────┘                └───────┬───────────┬───────────┬──────┘
//!                                        ▼           ▼           ▼
//!                                  prefix.rs   inverted.rs   sorted.rs
//!                                  (tries)     (word sets)   (anchor +
//!                                                             expand)
//! ```
//!
//! | Strategy | Matches                                              |
//! |----------|------------------------------------------------------|
//! | `prefix` | title or author *starts with* the query              |
//! | `token`  | title/author words contain *every known* query word  |
//! | `sorted` | title or author *contains* the query, near the probe |
//! | `hybrid` | union of the three                                   |
//!
//! Every strategy also returns the record whose identifier equals the query
//! exactly (case-sensitive), and every strategy returns nothing for a blank
//! query.
//!
//! # Usage
//!
//! ```
//! use catalex::{Record, SearchCoordinator};
//!
//! let coordinator = SearchCoordinator::new();
//! coordinator.build(&[
//!     Record::new("111", "Data Structures", "Jane Smith", 2021),
//!     Record::new("222", "Data Mining", "Bob Lee", 2019),
//! ]);
//!
//! let hits = coordinator.search("data", "token").unwrap();
//! assert_eq!(hits.len(), 2);
//! ```

// Module declarations
pub mod bench;
pub mod catalog;
mod error;
mod hybrid;
mod inverted;
mod prefix;
mod sorted;
mod types;
mod utils;

#[doc(hidden)]
pub mod testing;

// Re-exports for public API
pub use bench::{
    generate_catalog, run_benchmarks, BenchmarkEntry, BenchmarkGroup, BenchmarkResult,
    BenchmarkTable,
};
pub use catalog::{linear_scan, load_records, save_records, CatalogStats, Library, User};
pub use error::{CatalogError, Error, Result};
pub use hybrid::{IndexSet, SearchCoordinator};
pub use inverted::TokenIndex;
pub use prefix::PrefixIndex;
pub use sorted::SortedIndex;
pub use types::{IndexOptions, Record, RecordHandle, RecordRef, Strategy};
pub use utils::{is_blank_query, normalize, tokenize, union_by_isbn};
