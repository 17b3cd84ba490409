//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ina-ripper")]
#[command(about = "Consolidate archive catalog records and match them to online media", long_about = None)]
pub(crate) struct Cli {
    /// Path of the record database (defaults to the configured one)
    #[arg(short, long, global = true)]
    pub database: Option<PathBuf>,

    /// Overwrite the database without asking for confirmation
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Collections to operate on, by name or slug (defaults to all)
    #[arg(short, long, global = true, value_delimiter = ',')]
    pub collections: Vec<String>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Deduplicate, reorder and renumber every collection
    Clean,

    /// Fill in credits and ranked media candidates from pre-fetched dumps
    Enrich {
        /// JSON object mapping search queries to their results
        #[arg(long)]
        candidates: PathBuf,

        /// JSON object mapping detail-page links to their credits text
        #[arg(long)]
        credits: Option<PathBuf>,

        /// Skip records that already have candidates
        #[arg(short, long)]
        append: bool,

        /// Minimum delay between two records, in seconds
        #[arg(long)]
        delay: Option<f64>,

        /// Candidates kept per record (0 keeps all)
        #[arg(long)]
        max_candidates: Option<usize>,
    },

    /// Show the best media candidate of every record
    Select,

    /// Show the download plan of every record
    Plan,

    /// Show per-collection statistics
    Stats,

    /// Inspect the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Print the settings file path
    Path,
}
