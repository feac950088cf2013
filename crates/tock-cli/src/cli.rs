//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Terminal stopwatch for tracking time per category.
///
/// Start a timer, stop it, and the elapsed time is rounded up to the next
/// five minutes and saved under the current category.
#[derive(Debug, Parser)]
#[command(name = "tock", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the interactive timer (default).
    Timer {
        /// Category to preselect.
        #[arg(long)]
        category: Option<String>,
    },

    /// List recorded categories.
    Categories {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show recent time entries.
    Log {
        /// Maximum number of entries to show.
        #[arg(short = 'n', long, default_value_t = 20)]
        limit: usize,

        /// Show every entry.
        #[arg(long, conflicts_with = "limit")]
        all: bool,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show total time per category.
    Summary {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show database location and entry count.
    Status,
}
