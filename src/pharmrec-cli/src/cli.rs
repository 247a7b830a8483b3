//! CLI argument definitions for pharmrec

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pharmrec")]
#[command(about = "Legacy pharmacy dispensing-file parser", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse dispensing files and emit JSON
    #[command(visible_alias = "p")]
    Parse {
        /// Input file(s)
        inputs: Vec<PathBuf>,

        /// Write one .json per input into this directory instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,

        /// Drug master table for registered-name annotation
        /// (uses the configured default if not provided)
        #[arg(short, long)]
        master: Option<PathBuf>,
    },

    /// Inspect one file (parse and display a per-record summary)
    #[command(visible_alias = "i")]
    Inspect {
        /// Path to dispensing file
        input: PathBuf,

        /// Show every medication line, not just counts
        #[arg(short, long)]
        full: bool,
    },

    /// Scan a directory of dispensing files and summarize
    #[command(visible_alias = "s")]
    Scan {
        /// Directory to walk
        path: PathBuf,

        /// File extension to match
        #[arg(short, long, default_value = "txt")]
        extension: String,
    },

    /// Configure default settings
    #[command(visible_alias = "c")]
    Configure {
        /// Set the default drug master table path
        #[arg(long)]
        master_db: Option<PathBuf>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}
