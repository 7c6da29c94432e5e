//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// TANAW: cleaning tool for DepEd enrollment spreadsheets
#[derive(Parser)]
#[command(name = "tanaw")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clean a raw enrollment file and write the canonical CSV
    Clean {
        /// Path to the enrollment file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Directory for the cleaned CSV (default: next to the input)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Upper bound for one school-level enrollment cell
        #[arg(long)]
        max_per_cell: Option<i64>,

        /// Output the cleaning report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Detect the layout and preview the reconstructed headers
    Inspect {
        /// Path to the enrollment file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Number of data rows to preview
        #[arg(short = 'n', long, default_value = "5")]
        rows: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Clean in memory and print enrollment aggregates
    Summary {
        /// Path to the enrollment file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
