use anyhow::{Context, Result};
use catalex::bench::{generate_seeded, DEFAULT_QUERIES};
use catalex::{
    load_records, run_benchmarks, save_records, BenchmarkTable, IndexOptions, Library, Record,
    SearchCoordinator,
};
use clap::Parser;
use std::path::Path;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

mod cli;
use cli::display;
use cli::{parse_strategy, Cli, Commands};

fn main() {
    init_logging();

    let cli = Cli::parse();
    if let Err(e) = run(cli.command) {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so stdout carries only results. `CATALEX_LOG` takes
/// the usual filter directives, e.g. `CATALEX_LOG=catalex=debug`.
fn init_logging() {
    let filter = EnvFilter::try_from_env("CATALEX_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Search {
            catalog,
            query,
            strategy,
            limit,
            sequential,
            json,
        } => run_search(&catalog, &query, &strategy, limit, sequential, json),
        Commands::Stats { catalog } => run_stats(&catalog),
        Commands::Generate {
            count,
            seed,
            output,
        } => run_generate(count, seed, output.as_deref()),
        Commands::Bench {
            sizes,
            query,
            seed,
            json,
        } => run_bench(&sizes, &query, seed, json),
    }
}

fn read_catalog(path: &Path) -> Result<Vec<Record>> {
    load_records(path).with_context(|| format!("failed to read catalog {}", path.display()))
}

fn run_search(
    catalog: &Path,
    query: &str,
    strategy: &str,
    limit: usize,
    sequential: bool,
    json: bool,
) -> Result<()> {
    // Reject a bad tag before paying for a build
    let strategy = parse_strategy(strategy)?;
    let records = read_catalog(catalog)?;

    let coordinator = SearchCoordinator::with_options(IndexOptions {
        parallel: !sequential,
    });
    coordinator.build(&records);

    let start = Instant::now();
    let hits = coordinator.search_with(query, strategy);
    let elapsed = start.elapsed();

    if json {
        let shown: Vec<&Record> = hits.iter().take(limit).map(|r| r.as_ref()).collect();
        println!("{}", serde_json::to_string_pretty(&shown)?);
    } else {
        display::print_lines(&display::search_lines(
            query, strategy, &hits, limit, elapsed,
        ));
    }
    Ok(())
}

fn run_stats(catalog: &Path) -> Result<()> {
    let records = read_catalog(catalog)?;
    let library = Library::from_records(records)
        .with_context(|| format!("invalid catalog {}", catalog.display()))?;
    display::print_lines(&display::stats_lines(
        &catalog.display().to_string(),
        &library.stats(),
    ));
    Ok(())
}

fn run_generate(count: usize, seed: u64, output: Option<&Path>) -> Result<()> {
    let records = generate_seeded(count, seed);
    match output {
        Some(path) => {
            save_records(path, &records)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("✓ wrote {} records to {}", records.len(), path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&records)?),
    }
    Ok(())
}

fn run_bench(sizes: &[usize], queries: &[String], seed: u64, json: bool) -> Result<()> {
    let queries: Vec<&str> = if queries.is_empty() {
        DEFAULT_QUERIES.to_vec()
    } else {
        queries.iter().map(String::as_str).collect()
    };

    let results = run_benchmarks(sizes, &queries, seed);
    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        display::print_lines(&display::benchmark_lines(&BenchmarkTable::from_results(
            &results,
        )));
    }
    Ok(())
}
