//! Text normalization, tokenization and result merging shared by every index.

use crate::types::{Record, RecordRef};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Normalize text for matching: lowercase only.
///
/// Whitespace and punctuation are kept as-is. Prefix and substring matching
/// both work on this form, so "Data  Mining" and "data mining" are different
/// keys on purpose.
#[inline]
pub fn normalize(value: &str) -> String {
    value.to_lowercase()
}

/// True for queries that should match nothing at all.
///
/// Every strategy short-circuits on these, including the identifier lookup.
#[inline]
pub fn is_blank_query(query: &str) -> bool {
    query.trim().is_empty()
}

/// Word character: alphanumeric or underscore.
#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Split text into lowercased words.
///
/// A word is a maximal run of alphanumeric or underscore characters. Everything
/// else is a delimiter. Duplicates are kept, in text order.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split(|c: char| !is_word_char(c))
        .filter(|word| !word.is_empty())
        .map(String::from)
        .collect()
}

/// Wrap a snapshot in shared handles, dropping records that cannot be
/// identified.
///
/// A record with a blank identifier (empty or whitespace-only) is skipped with
/// a warning, since no query could ever look it up. So is any record whose
/// identifier already appeared earlier in the snapshot. The rest of the
/// snapshot is still indexed.
pub fn share_records(records: &[Record]) -> Vec<RecordRef> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(records.len());
    let mut shared = Vec::with_capacity(records.len());
    for record in records {
        if is_blank_query(&record.isbn) {
            tracing::warn!(title = %record.title, "skipping record with blank identifier");
            continue;
        }
        if !seen.insert(record.isbn.as_str()) {
            tracing::warn!(isbn = %record.isbn, "skipping duplicate identifier in snapshot");
            continue;
        }
        shared.push(Arc::new(record.clone()));
    }
    shared
}

/// Identifier map over a shared snapshot.
pub fn isbn_map(records: &[RecordRef]) -> HashMap<String, RecordRef> {
    records
        .iter()
        .map(|record| (record.isbn.clone(), Arc::clone(record)))
        .collect()
}

/// Merge result lists into one list with each identifier at most once.
///
/// Output is sorted by identifier so set-like results compare and print
/// the same way every time.
pub fn union_by_isbn<I>(lists: I) -> Vec<RecordRef>
where
    I: IntoIterator,
    I::Item: IntoIterator<Item = RecordRef>,
{
    let mut seen: HashMap<String, RecordRef> = HashMap::new();
    for list in lists {
        for record in list {
            seen.entry(record.isbn.clone()).or_insert(record);
        }
    }
    let mut merged: Vec<RecordRef> = seen.into_values().collect();
    merged.sort_by(|a, b| a.isbn.cmp(&b.isbn));
    merged
}
