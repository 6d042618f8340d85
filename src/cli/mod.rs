//! CLI definitions for the catalex command-line interface.
//!
//! Four subcommands: `search` to query a catalog file, `stats` to summarize
//! one, `generate` to write a synthetic catalog, and `bench` to compare the
//! strategies against a linear scan.

pub mod display;

use catalex::Strategy;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "catalex",
    about = "In-memory catalog search with prefix, token, sorted and hybrid indexes",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search a catalog file and display results
    Search {
        /// Path to a catalog JSON file (array of records)
        #[arg(short, long)]
        catalog: PathBuf,

        /// Search query
        query: String,

        /// prefix, token, sorted or hybrid
        #[arg(short, long, default_value = "hybrid")]
        strategy: String,

        /// Maximum number of results to display
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Build the indexes one after another instead of in parallel
        #[arg(long)]
        sequential: bool,

        /// Print results as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show record and availability counts for a catalog file
    Stats {
        /// Path to a catalog JSON file
        #[arg(short, long)]
        catalog: PathBuf,
    },

    /// Write a synthetic catalog
    Generate {
        /// Number of records
        #[arg(short = 'n', long, default_value = "1000")]
        count: usize,

        /// RNG seed; the same seed always yields the same catalog
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Time every strategy against a linear scan on synthetic catalogs
    Bench {
        /// Catalog sizes, comma separated
        #[arg(long, value_delimiter = ',', default_values_t = catalex::bench::DEFAULT_SIZES.to_vec())]
        sizes: Vec<usize>,

        /// Queries, comma separated (defaults to a fixed mix)
        #[arg(short, long, value_delimiter = ',')]
        query: Vec<String>,

        /// RNG seed for the synthetic catalogs
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Print raw results as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

/// Parse a strategy tag from the command line.
pub fn parse_strategy(tag: &str) -> catalex::Result<Strategy> {
    tag.parse()
}
