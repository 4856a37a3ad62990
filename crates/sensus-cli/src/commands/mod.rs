//! Command definitions for the `sensus` CLI.

pub mod migrate;
pub mod report;
pub mod schema;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Congregation census store administration
#[derive(Parser, Debug)]
#[command(name = "sensus")]
#[command(version)]
#[command(about = "Apply additive schema evolution and print census reports")]
pub struct Cli {
    /// Directory holding sensus.toml
    #[arg(long, default_value = ".")]
    pub config_dir: PathBuf,

    /// Database file (overrides config and SENSUS_DB_PATH)
    #[arg(long)]
    pub db: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply the cumulative release history and print one outcome per spec
    Migrate {
        /// Exit non-zero if any spec failed
        #[arg(long)]
        strict: bool,
    },

    /// Print the census report as JSON
    Report {
        /// Print only this metric
        #[arg(long)]
        metric: Option<String>,

        /// Pretty-print JSON
        #[arg(long)]
        pretty: bool,
    },

    /// List report metric names
    Metrics,

    /// List the congregant table's columns and declared types
    Schema,
}
