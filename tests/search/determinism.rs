//! Determinism: same snapshot, same query, same answer.

use crate::common::{coordinator_over, ids, sample_catalog, search_ids, sequential_coordinator_over};
use catalex::bench::generate_seeded;
use catalex::{SortedIndex, Strategy};

const QUERIES: &[&str] = &["data", "mining", "rust", "jane", "the", "444", "pro", "zzz"];

#[test]
fn test_rebuild_from_same_snapshot_is_identical() {
    let records = sample_catalog();
    let first = coordinator_over(&records);
    let second = coordinator_over(&records);
    for strategy in Strategy::ALL {
        for query in QUERIES {
            assert_eq!(
                search_ids(&first, query, strategy),
                search_ids(&second, query, strategy),
                "strategy {} query {:?}",
                strategy,
                query
            );
        }
    }
}

#[test]
fn test_repeated_search_is_identical() {
    let coordinator = coordinator_over(&sample_catalog());
    for strategy in Strategy::ALL {
        let once = search_ids(&coordinator, "programming", strategy);
        let twice = search_ids(&coordinator, "programming", strategy);
        assert_eq!(once, twice);
    }
}

#[test]
fn test_parallel_and_sequential_builds_agree_on_generated_catalog() {
    let records = generate_seeded(300, 11);
    let parallel = coordinator_over(&records);
    let sequential = sequential_coordinator_over(&records);
    for strategy in Strategy::ALL {
        for query in ["programming", "smith 4", "data", "ISBN-1", "web development"] {
            assert_eq!(
                search_ids(&parallel, query, strategy),
                search_ids(&sequential, query, strategy)
            );
        }
    }
}

#[test]
fn test_sorted_scan_order_is_reproducible() {
    let records = generate_seeded(200, 5);
    let mut a = SortedIndex::new();
    let mut b = SortedIndex::new();
    a.build(&records);
    b.build(&records);
    assert_eq!(ids(&a.search_by_title("machine")), ids(&b.search_by_title("machine")));
    assert_eq!(ids(&a.search_by_author("smith")), ids(&b.search_by_author("smith")));
}

#[test]
fn test_set_results_are_sorted_by_identifier() {
    let coordinator = coordinator_over(&generate_seeded(150, 8));
    for strategy in Strategy::ALL {
        let hits = search_ids(&coordinator, "programming", strategy);
        let mut sorted = hits.clone();
        sorted.sort();
        assert_eq!(hits, sorted);
    }
}
