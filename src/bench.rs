//! Synthetic catalogs and a wall-clock comparison of the search strategies.
//!
//! Criterion covers the statistically careful numbers (`cargo bench`). This
//! module is the quick sweep behind `catalex bench`: one timed build and one
//! timed query pass per strategy and catalog size, with a linear scan as the
//! baseline every index is measured against.

use crate::catalog::linear_scan;
use crate::hybrid::IndexSet;
use crate::inverted::TokenIndex;
use crate::prefix::PrefixIndex;
use crate::sorted::SortedIndex;
use crate::types::{Record, RecordRef, Strategy};
use crate::utils::share_records;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::hint::black_box;
use std::time::{Duration, Instant};

/// Catalog sizes swept when none are given.
pub const DEFAULT_SIZES: &[usize] = &[100, 500, 1000, 5000, 10000];

/// Queries run against every catalog when none are given.
pub const DEFAULT_QUERIES: &[&str] = &[
    "programming",
    "smith",
    "ISBN-1234567890",
    "algorithms",
    "johnson",
];

const TOPICS: &[&str] = &[
    "Programming",
    "Algorithms",
    "Data Structures",
    "Software Engineering",
    "Database Systems",
    "Computer Networks",
    "Artificial Intelligence",
    "Machine Learning",
    "Web Development",
    "Mobile Computing",
];

const SURNAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
];

/// Name used for the full-scan baseline in reports.
pub const LINEAR_BASELINE: &str = "linear";

/// One timed measurement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkResult {
    pub algorithm_name: String,
    /// `build` or `search`.
    pub operation: String,
    pub data_size: usize,
    pub execution_time: Duration,
}

impl BenchmarkResult {
    fn new(
        algorithm_name: &str,
        operation: &str,
        data_size: usize,
        execution_time: Duration,
    ) -> Self {
        Self {
            algorithm_name: algorithm_name.to_string(),
            operation: operation.to_string(),
            data_size,
            execution_time,
        }
    }
}

/// One algorithm's row in a size group.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkEntry {
    pub algorithm_name: String,
    pub build: Option<Duration>,
    pub search: Option<Duration>,
    /// Linear scan time over this algorithm's search time.
    pub speedup: Option<f64>,
}

/// Results for one catalog size, algorithms in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkGroup {
    pub data_size: usize,
    pub entries: Vec<BenchmarkEntry>,
}

/// Flat results regrouped by catalog size for reporting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BenchmarkTable {
    pub groups: Vec<BenchmarkGroup>,
}

impl BenchmarkTable {
    pub fn from_results(results: &[BenchmarkResult]) -> Self {
        let mut groups: Vec<BenchmarkGroup> = Vec::new();

        for result in results {
            let group = match groups.iter().position(|g| g.data_size == result.data_size) {
                Some(i) => &mut groups[i],
                None => {
                    groups.push(BenchmarkGroup {
                        data_size: result.data_size,
                        entries: Vec::new(),
                    });
                    let last = groups.len() - 1;
                    &mut groups[last]
                }
            };
            let entry = match group
                .entries
                .iter()
                .position(|e| e.algorithm_name == result.algorithm_name)
            {
                Some(i) => &mut group.entries[i],
                None => {
                    group.entries.push(BenchmarkEntry {
                        algorithm_name: result.algorithm_name.clone(),
                        build: None,
                        search: None,
                        speedup: None,
                    });
                    let last = group.entries.len() - 1;
                    &mut group.entries[last]
                }
            };
            match result.operation.as_str() {
                "build" => entry.build = Some(result.execution_time),
                "search" => entry.search = Some(result.execution_time),
                other => tracing::warn!(operation = other, "ignoring unknown benchmark operation"),
            }
        }

        for group in &mut groups {
            let baseline = group
                .entries
                .iter()
                .find(|e| e.algorithm_name == LINEAR_BASELINE)
                .and_then(|e| e.search);
            for entry in &mut group.entries {
                entry.speedup = match (baseline, entry.search) {
                    (Some(base), Some(own)) if !own.is_zero() => {
                        Some(base.as_secs_f64() / own.as_secs_f64())
                    }
                    _ => None,
                };
            }
        }

        Self { groups }
    }
}

/// Generate `count` synthetic records.
///
/// Titles are `"<topic> <i>"` so every title is distinct; authors are
/// `"<surname> <n>"` with `n` in `1..=100`. Identifiers are random
/// `ISBN-` plus ten digits and may, rarely, repeat.
pub fn generate_catalog<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Record> {
    (0..count)
        .map(|i| {
            let isbn = format!("ISBN-{}", rng.gen_range(1_000_000_000u64..=9_999_999_999));
            let topic = TOPICS.choose(rng).copied().unwrap_or("Programming");
            let surname = SURNAMES.choose(rng).copied().unwrap_or("Smith");
            let author = format!("{} {}", surname, rng.gen_range(1..=100));
            let year = rng.gen_range(1990..=2024);
            Record::new(isbn, format!("{} {}", topic, i), author, year)
        })
        .collect()
}

/// Seeded convenience wrapper over [`generate_catalog`].
pub fn generate_seeded(count: usize, seed: u64) -> Vec<Record> {
    generate_catalog(count, &mut StdRng::seed_from_u64(seed))
}

/// Time build and query cost of every strategy, plus the linear baseline,
/// for each catalog size.
///
/// The same seed yields the same catalogs, so runs are comparable.
pub fn run_benchmarks(sizes: &[usize], queries: &[&str], seed: u64) -> Vec<BenchmarkResult> {
    let mut results = Vec::with_capacity(sizes.len() * (Strategy::ALL.len() + 1) * 2);

    for &size in sizes {
        let records = generate_seeded(size, seed);
        let shared = share_records(&records);
        tracing::debug!(size, "benchmarking catalog");

        for strategy in Strategy::ALL {
            let (set, build_time) = timed(|| build_for(strategy, &shared));
            results.push(BenchmarkResult::new(strategy.as_str(), "build", size, build_time));

            let (_, search_time) = timed(|| {
                for query in queries {
                    black_box(set.search(query, strategy));
                }
            });
            results.push(BenchmarkResult::new(strategy.as_str(), "search", size, search_time));
        }

        let (_, scan_time) = timed(|| {
            for query in queries {
                black_box(linear_scan(&records, query));
            }
        });
        results.push(BenchmarkResult::new(LINEAR_BASELINE, "search", size, scan_time));
    }

    results
}

/// Build only the index a strategy reads; hybrid needs all three.
fn build_for(strategy: Strategy, records: &[RecordRef]) -> IndexSet {
    let mut set = IndexSet::default();
    match strategy {
        Strategy::Prefix => {
            let mut prefix = PrefixIndex::new();
            prefix.build_shared(records);
            set.prefix = prefix;
        }
        Strategy::Token => {
            let mut token = TokenIndex::new();
            token.build_shared(records);
            set.token = token;
        }
        Strategy::Sorted => {
            let mut sorted = SortedIndex::new();
            sorted.build_shared(records);
            set.sorted = sorted;
        }
        Strategy::Hybrid => set = IndexSet::build(records, Default::default()),
    }
    set
}

fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let value = f();
    (value, start.elapsed())
}
