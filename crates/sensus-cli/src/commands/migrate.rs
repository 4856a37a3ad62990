//! `sensus migrate`

use std::io::Write;

use serde::Serialize;
use sensus_core::config::SensusConfig;
use sensus_core::types::{EvolutionOutcome, EvolutionSummary};
use sensus_storage::evolution::{self, history};

use crate::error::{CliError, CliResult};

#[derive(Serialize)]
struct OutcomeLine<'a> {
    spec: String,
    #[serde(flatten)]
    outcome: &'a EvolutionOutcome,
}

#[derive(Serialize)]
struct MigrateOutput<'a> {
    outcomes: Vec<OutcomeLine<'a>>,
    summary: EvolutionSummary,
}

pub fn run<W: Write>(config: &SensusConfig, out: &mut W) -> CliResult<()> {
    let specs = history::cumulative();
    let path = config.database.effective_path();
    let outcomes = evolution::apply(&path, &specs)?;
    let summary = EvolutionSummary::from_outcomes(&outcomes);

    let output = MigrateOutput {
        outcomes: specs
            .iter()
            .zip(&outcomes)
            .map(|(spec, outcome)| OutcomeLine {
                spec: spec.to_string(),
                outcome,
            })
            .collect(),
        summary,
    };
    serde_json::to_writer_pretty(&mut *out, &output)?;
    writeln!(out)?;

    if config.evolution.is_strict() && !summary.is_clean() {
        return Err(CliError::MigrationFailed {
            failed: summary.failed,
        });
    }
    Ok(())
}
