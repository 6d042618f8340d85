//! Rebuild semantics: wholesale replacement and snapshot isolation.

use crate::common::{coordinator_over, ids, make_record, sample_catalog, scenario_catalog, search_ids};
use catalex::{Library, SearchCoordinator, Strategy, User};
use std::sync::Arc;
use std::thread;

#[test]
fn test_rebuild_drops_old_records() {
    let coordinator = coordinator_over(&sample_catalog());
    coordinator.build(&[make_record("9", "Zoology", "Ann Ray")]);
    assert!(search_ids(&coordinator, "data", Strategy::Hybrid).is_empty());
    assert_eq!(search_ids(&coordinator, "zoo", Strategy::Prefix), vec!["9"]);
}

#[test]
fn test_rebuild_to_empty() {
    let coordinator = coordinator_over(&sample_catalog());
    coordinator.build(&[]);
    assert!(coordinator.is_empty());
    assert!(search_ids(&coordinator, "data", Strategy::Hybrid).is_empty());
}

#[test]
fn test_held_snapshot_survives_rebuild() {
    let coordinator = coordinator_over(&scenario_catalog());
    let held = coordinator.snapshot();
    coordinator.build(&[]);
    assert_eq!(ids(&held.search("data", Strategy::Token)), vec!["111", "222"]);
    assert!(coordinator.snapshot().is_empty());
}

#[test]
fn test_catalog_changes_need_a_rebuild() {
    let mut library = Library::from_records(scenario_catalog()).unwrap();
    library.register_user(User::new("u1", "Ann")).unwrap();

    let coordinator = SearchCoordinator::new();
    coordinator.build(&library.snapshot());

    library.borrow("u1", "111").unwrap();
    let stale = coordinator.search_with("111", Strategy::Hybrid);
    assert!(stale[0].available);

    coordinator.build(&library.snapshot());
    let fresh = coordinator.search_with("111", Strategy::Hybrid);
    assert!(!fresh[0].available);
}

#[test]
fn test_concurrent_searches_during_rebuilds() {
    let coordinator = Arc::new(coordinator_over(&scenario_catalog()));
    let other = vec![make_record("111", "Data Structures", "Jane Smith")];

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let coordinator = Arc::clone(&coordinator);
            thread::spawn(move || {
                for _ in 0..200 {
                    let hits = coordinator.search_with("data", Strategy::Token);
                    // either the two-record snapshot or the one-record one, never a mix
                    let found = ids(&hits);
                    assert!(found == vec!["111", "222"] || found == vec!["111"], "{:?}", found);
                }
            })
        })
        .collect();

    for i in 0..50 {
        if i % 2 == 0 {
            coordinator.build(&other);
        } else {
            coordinator.build(&scenario_catalog());
        }
    }

    for reader in readers {
        reader.join().unwrap();
    }
}
