//! Correctness tests: each strategy returns what its matching rule promises.

use crate::common::{coordinator_over, ids, sample_catalog, scenario_catalog, search_ids};
use catalex::{PrefixIndex, SortedIndex, Strategy, TokenIndex};

// ============================================================================
// SCENARIO: the two-record catalog
// ============================================================================

#[test]
fn test_scenario_token_data() {
    let mut index = TokenIndex::new();
    index.build(&scenario_catalog());
    assert_eq!(ids(&index.search("data")), vec!["111", "222"]);
}

#[test]
fn test_scenario_sorted_title_structures() {
    let mut index = SortedIndex::new();
    index.build(&scenario_catalog());
    assert_eq!(ids(&index.search_by_title("structures")), vec!["111"]);
}

#[test]
fn test_scenario_prefix_dat() {
    let mut index = PrefixIndex::new();
    index.build(&scenario_catalog());
    assert_eq!(ids(&index.search("dat")), vec!["111", "222"]);
}

#[test]
fn test_scenario_hybrid_identifier() {
    let coordinator = coordinator_over(&scenario_catalog());
    assert_eq!(
        ids(&coordinator.search("111", "hybrid").unwrap()),
        vec!["111"]
    );
    for strategy in [Strategy::Prefix, Strategy::Token, Strategy::Sorted] {
        assert_eq!(search_ids(&coordinator, "111", strategy), vec!["111"]);
    }
}

// ============================================================================
// STRATEGY SEMANTICS
// ============================================================================

#[test]
fn test_prefix_matches_author_start() {
    let coordinator = coordinator_over(&sample_catalog());
    assert_eq!(
        search_ids(&coordinator, "jane", Strategy::Prefix),
        vec!["111", "333"]
    );
    // "smith" is inside "Jane Smith" but does not start it
    assert!(search_ids(&coordinator, "smith", Strategy::Prefix).is_empty());
}

#[test]
fn test_token_matches_whole_words_anywhere() {
    let coordinator = coordinator_over(&sample_catalog());
    assert_eq!(
        search_ids(&coordinator, "smith", Strategy::Token),
        vec!["111"]
    );
    assert_eq!(
        search_ids(&coordinator, "rust programming", Strategy::Token),
        vec!["444", "555"]
    );
    assert_eq!(
        search_ids(&coordinator, "rust language", Strategy::Token),
        vec!["555"]
    );
}

#[test]
fn test_token_unknown_word_does_not_empty_result() {
    let coordinator = coordinator_over(&sample_catalog());
    assert_eq!(
        search_ids(&coordinator, "mining unobtainium", Strategy::Token),
        vec!["222", "333"]
    );
}

#[test]
fn test_token_punctuation_splits_query() {
    let coordinator = coordinator_over(&sample_catalog());
    assert_eq!(
        search_ids(&coordinator, "data,structures!", Strategy::Token),
        vec!["111"]
    );
}

#[test]
fn test_sorted_author_substring() {
    let mut index = SortedIndex::new();
    index.build(&sample_catalog());
    // authors sorted: bob lee, jane doe, jane smith, jim blandy, robert sedgewick, steve klabnik
    // mid=2 "jane smith" contains "smith"
    assert_eq!(ids(&index.search_by_author("smith")), vec!["111"]);
}

#[test]
fn test_sorted_anchor_then_left_then_right() {
    let mut index = SortedIndex::new();
    index.build(&sample_catalog());
    // authors sorted: bob lee, jane doe, jane smith, jim blandy, ...
    // mid=2 "jane smith" anchors; "jane doe" extends left, "bob lee" stops it
    assert_eq!(ids(&index.search_by_author("jane")), vec!["111", "333"]);
}

#[test]
fn test_hybrid_equals_union_of_strategies() {
    let coordinator = coordinator_over(&sample_catalog());
    for query in ["data", "mining", "rust", "jane", "the", "444", "algo"] {
        let mut expected: Vec<String> = [Strategy::Prefix, Strategy::Token, Strategy::Sorted]
            .into_iter()
            .flat_map(|s| search_ids(&coordinator, query, s))
            .collect();
        expected.sort();
        expected.dedup();
        assert_eq!(
            search_ids(&coordinator, query, Strategy::Hybrid),
            expected,
            "query {:?}",
            query
        );
    }
}

#[test]
fn test_hybrid_adds_what_prefix_misses() {
    let coordinator = coordinator_over(&sample_catalog());
    assert!(search_ids(&coordinator, "mining", Strategy::Prefix).contains(&"333".to_string()));
    assert!(!search_ids(&coordinator, "mining", Strategy::Prefix).contains(&"222".to_string()));
    assert_eq!(
        search_ids(&coordinator, "mining", Strategy::Hybrid),
        vec!["222", "333"]
    );
}

#[test]
fn test_results_are_shared_not_copied() {
    let coordinator = coordinator_over(&scenario_catalog());
    let first = coordinator.search_with("data", Strategy::Token);
    let second = coordinator.search_with("data", Strategy::Prefix);
    assert!(std::sync::Arc::ptr_eq(&first[0], &second[0]));
}
