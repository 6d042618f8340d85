//! Shared test utilities and fixtures.

#![allow(dead_code)]

use catalex::{IndexOptions, Record, RecordRef, SearchCoordinator, Strategy};

// Re-export canonical test utilities from catalex::testing
pub use catalex::testing::{ids, make_record, sample_catalog, scenario_catalog};

// ============================================================================
// COORDINATORS
// ============================================================================

/// Coordinator built over `records` with default options.
pub fn coordinator_over(records: &[Record]) -> SearchCoordinator {
    let coordinator = SearchCoordinator::new();
    coordinator.build(records);
    coordinator
}

/// Coordinator that builds its indexes one after another.
pub fn sequential_coordinator_over(records: &[Record]) -> SearchCoordinator {
    let coordinator = SearchCoordinator::with_options(IndexOptions { parallel: false });
    coordinator.build(records);
    coordinator
}

// ============================================================================
// ASSERTIONS
// ============================================================================

/// Search by tag and return the identifiers of the hits.
pub fn search_ids(coordinator: &SearchCoordinator, query: &str, strategy: Strategy) -> Vec<String> {
    coordinator
        .search_with(query, strategy)
        .iter()
        .map(|r| r.isbn.clone())
        .collect()
}

/// Assert a result list holds each identifier at most once.
pub fn assert_unique(results: &[RecordRef]) {
    let mut seen: Vec<&str> = results.iter().map(|r| r.isbn.as_str()).collect();
    let len = seen.len();
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), len, "duplicate identifiers in {:?}", ids(results));
}
