//! Edge cases: blank queries, empty catalogs, odd records and odd tags.

use crate::common::{coordinator_over, make_record, sample_catalog, search_ids};
use catalex::{CatalogError, Error, Library, Record, SearchCoordinator, Strategy};

#[test]
fn test_blank_query_matches_nothing_anywhere() {
    let coordinator = coordinator_over(&sample_catalog());
    for strategy in Strategy::ALL {
        for query in ["", " ", "\t\n"] {
            assert!(
                coordinator.search_with(query, strategy).is_empty(),
                "strategy {} query {:?}",
                strategy,
                query
            );
        }
    }
}

#[test]
fn test_whitespace_identifier_is_skipped_at_build() {
    let coordinator = coordinator_over(&[make_record("  ", "Spaces", "Nobody")]);
    assert_eq!(coordinator.len(), 0);
    for strategy in Strategy::ALL {
        assert!(coordinator.search_with("spaces", strategy).is_empty());
    }
}

#[test]
fn test_whitespace_identifier_rejected_by_library() {
    let mut library = Library::from_records(sample_catalog()).unwrap();
    let err = library
        .add_record(make_record(" \t", "Spaces", "Nobody"))
        .unwrap_err();
    assert!(matches!(err, CatalogError::MalformedRecord { .. }));

    // every record that made it into the catalog is findable by identifier
    let coordinator = coordinator_over(&library.snapshot());
    for record in library.records() {
        for strategy in Strategy::ALL {
            assert!(search_ids(&coordinator, &record.isbn, strategy).contains(&record.isbn));
        }
    }
}

#[test]
fn test_empty_catalog_build_is_ready() {
    let coordinator = coordinator_over(&[]);
    assert!(coordinator.is_empty());
    for strategy in Strategy::ALL {
        assert!(coordinator.search_with("anything", strategy).is_empty());
    }
    assert!(coordinator.search("anything", "hybrid").unwrap().is_empty());
}

#[test]
fn test_unknown_strategy_is_invalid_argument() {
    let coordinator = coordinator_over(&sample_catalog());
    for tag in ["fuzzy", "", "Hybrid", "binary", "prefix "] {
        let err = coordinator.search("data", tag).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)), "tag {:?}", tag);
    }
}

#[test]
fn test_error_message_names_the_tag() {
    let coordinator = SearchCoordinator::new();
    let err = coordinator.search("data", "fuzzy").unwrap_err();
    assert!(err.to_string().contains("fuzzy"));
}

#[test]
fn test_no_match_is_empty_not_error() {
    let coordinator = coordinator_over(&sample_catalog());
    for strategy in Strategy::ALL {
        assert!(coordinator
            .search(&"zzzz".repeat(3), strategy.as_str())
            .unwrap()
            .is_empty());
    }
}

#[test]
fn test_identifier_match_is_exact_and_case_sensitive() {
    let coordinator = coordinator_over(&[make_record("ISBN-AB12", "Title", "Author")]);
    assert_eq!(
        search_ids(&coordinator, "ISBN-AB12", Strategy::Hybrid),
        vec!["ISBN-AB12"]
    );
    assert!(search_ids(&coordinator, "isbn-ab12", Strategy::Hybrid).is_empty());
    assert!(search_ids(&coordinator, "ISBN-AB1", Strategy::Token).is_empty());
}

#[test]
fn test_malformed_and_duplicate_records_are_skipped() {
    let coordinator = coordinator_over(&[
        make_record("", "Orphan", "Nobody"),
        make_record("1", "First Copy", "Ann"),
        make_record("1", "Second Copy", "Ben"),
        make_record("2", "Other", "Cy"),
    ]);
    assert_eq!(coordinator.len(), 2);
    assert!(search_ids(&coordinator, "orphan", Strategy::Hybrid).is_empty());
    assert!(search_ids(&coordinator, "second", Strategy::Hybrid).is_empty());
    assert_eq!(search_ids(&coordinator, "first", Strategy::Hybrid), vec!["1"]);
}

#[test]
fn test_unicode_lowercasing() {
    let coordinator = coordinator_over(&[Record::new("1", "Über Café", "Zoë Ångström", 2020)]);
    assert_eq!(search_ids(&coordinator, "über", Strategy::Prefix), vec!["1"]);
    assert_eq!(search_ids(&coordinator, "CAFÉ", Strategy::Token), vec!["1"]);
    assert_eq!(search_ids(&coordinator, "ångström", Strategy::Sorted), vec!["1"]);
}

#[test]
fn test_availability_does_not_affect_matching() {
    let mut record = make_record("1", "Lent Out", "Someone");
    record.available = false;
    let coordinator = coordinator_over(&[record]);
    for strategy in Strategy::ALL {
        assert_eq!(search_ids(&coordinator, "lent", strategy).len(), 1);
    }
}
