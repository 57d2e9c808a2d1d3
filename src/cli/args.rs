//! CLI argument definitions using clap
//!
//! Commands:
//! - mocktable query --data <path> [--config <path>] [--request <json>]
//! - mocktable serve --data <path> [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// mocktable - an in-memory, schema-less table for tests and mock servers
#[derive(Parser, Debug)]
#[command(name = "mocktable")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a single query and exit
    Query {
        /// JSON file holding an array of rows
        #[arg(long)]
        data: PathBuf,

        /// Path to table configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Query as JSON; read from one stdin line if omitted
        #[arg(long)]
        request: Option<String>,
    },

    /// Serve line-delimited JSON operations on stdin
    Serve {
        /// JSON file holding an array of rows
        #[arg(long)]
        data: PathBuf,

        /// Path to table configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
