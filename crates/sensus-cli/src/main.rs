//! `sensus`: deploy-time schema evolution and census reports.
//!
//! Usage:
//!   sensus migrate [--strict]     - Apply the cumulative release history
//!   sensus report [--metric NAME] - Print the census report as JSON
//!   sensus metrics                - List report metric names
//!   sensus schema                 - List the congregant table's columns

use clap::Parser;
use sensus_cli::{handler, Cli};

fn main() {
    let cli = Cli::parse();
    sensus_core::tracing::init_tracing();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = handler::run(cli, &mut out) {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}
