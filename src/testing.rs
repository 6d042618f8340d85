//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical fixtures so tests agree on what "the sample catalog" is.

#![doc(hidden)]

use crate::types::{Record, RecordRef};

/// Create a record with a fixed year.
pub fn make_record(isbn: &str, title: &str, author: &str) -> Record {
    Record::new(isbn, title, author, 2000)
}

/// Two-record catalog used by most scenario tests.
pub fn scenario_catalog() -> Vec<Record> {
    vec![
        Record::new("111", "Data Structures", "Jane Smith", 2021),
        Record::new("222", "Data Mining", "Bob Lee", 2019),
    ]
}

/// A small catalog with overlapping words, prefixes and authors.
pub fn sample_catalog() -> Vec<Record> {
    vec![
        Record::new("111", "Data Structures", "Jane Smith", 2021),
        Record::new("222", "Data Mining", "Bob Lee", 2019),
        Record::new("333", "Mining the Web", "Jane Doe", 2015),
        Record::new("444", "Programming Rust", "Jim Blandy", 2017),
        Record::new("555", "The Rust Programming Language", "Steve Klabnik", 2018),
        Record::new("666", "Algorithms", "Robert Sedgewick", 2011),
    ]
}

/// Identifiers of a result list, in result order.
pub fn ids(results: &[RecordRef]) -> Vec<&str> {
    results.iter().map(|r| r.isbn.as_str()).collect()
}
