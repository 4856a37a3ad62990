//! Dispatch parsed arguments to command implementations.

use std::io::Write;

use sensus_core::config::{CliOverrides, SensusConfig};

use crate::commands::{self, Cli, Commands};
use crate::error::CliResult;

pub fn run<W: Write>(cli: Cli, out: &mut W) -> CliResult<()> {
    let overrides = CliOverrides {
        db_path: cli.db.clone(),
        strict: match &cli.command {
            Commands::Migrate { strict: true } => Some(true),
            _ => None,
        },
        pretty: match &cli.command {
            Commands::Report { pretty: true, .. } => Some(true),
            _ => None,
        },
    };
    let config = SensusConfig::load(&cli.config_dir, Some(&overrides))?;
    tracing::debug!(db = %config.database.effective_path().display(), "configuration loaded");

    match cli.command {
        Commands::Migrate { .. } => commands::migrate::run(&config, out),
        Commands::Report { metric, .. } => commands::report::run(&config, metric.as_deref(), out),
        Commands::Metrics => commands::report::list_metrics(out),
        Commands::Schema => commands::schema::run(&config, out),
    }
}
