//! `sensus report` and `sensus metrics`

use std::io::Write;

use serde::Serialize;
use sensus_core::config::SensusConfig;
use sensus_storage::{aggregation, ReadPool};

use crate::error::{CliError, CliResult};

/// Read-only: the store must already exist and is never modified.
pub fn run<W: Write>(config: &SensusConfig, metric: Option<&str>, out: &mut W) -> CliResult<()> {
    if let Some(name) = metric {
        if !aggregation::metric_names().iter().any(|m| *m == name) {
            return Err(CliError::UnknownMetric {
                name: name.to_string(),
            });
        }
    }

    let readers = ReadPool::open(&config.database.effective_path(), 1)?;
    let pretty = config.report.is_pretty();

    match metric {
        Some(name) => {
            let value = readers
                .with_conn(|conn| aggregation::summarize_metric(conn, name))?
                .ok_or_else(|| CliError::UnknownMetric {
                    name: name.to_string(),
                })?;
            write_json(out, &value, pretty)
        }
        None => {
            let report = readers.with_conn(aggregation::summarize)?;
            write_json(out, &report, pretty)
        }
    }
}

pub fn list_metrics<W: Write>(out: &mut W) -> CliResult<()> {
    for name in aggregation::metric_names() {
        writeln!(out, "{name}")?;
    }
    Ok(())
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T, pretty: bool) -> CliResult<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}
