//! Census aggregation engine.
//!
//! `summarize` builds the full dashboard report from the current table in
//! one read session. Each metric is produced independently: a metric that
//! fails falls back to its zero value and is listed in
//! `AggregationReport::degraded`, so callers always get the complete shape.

pub mod catalog;
pub mod filter;
pub mod session;

use std::time::Instant;

use rusqlite::Connection;
use sensus_core::constants::CONGREGANTS_TABLE;
use sensus_core::errors::StorageError;
use sensus_core::types::{AggregationReport, MetricValue};

use self::catalog::{MetricDef, METRICS};
use self::session::ReadSession;

/// Compute every catalog metric. Read-only.
///
/// Only a failure to open the read session is returned as an error.
pub fn summarize(conn: &Connection) -> Result<AggregationReport, StorageError> {
    let start = Instant::now();
    let session = ReadSession::begin(conn, CONGREGANTS_TABLE)?;

    let mut report = AggregationReport::default();
    for metric in METRICS {
        let (value, degraded) = run_metric(&session, metric);
        if degraded {
            report.degraded.push(metric.name.to_string());
        }
        report.metrics.insert(metric.name.to_string(), value);
    }

    tracing::info!(
        metrics = report.metrics.len(),
        degraded = report.degraded.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "census report built"
    );
    Ok(report)
}

/// Compute one metric by name. `Ok(None)` for an unknown name.
pub fn summarize_metric(conn: &Connection, name: &str) -> Result<Option<MetricValue>, StorageError> {
    let Some(metric) = catalog::find(name) else {
        return Ok(None);
    };
    let session = ReadSession::begin(conn, CONGREGANTS_TABLE)?;
    Ok(Some(run_metric(&session, metric).0))
}

/// Stable metric names in catalog order.
pub fn metric_names() -> Vec<&'static str> {
    METRICS.iter().map(|m| m.name).collect()
}

fn run_metric(session: &ReadSession<'_>, metric: &MetricDef) -> (MetricValue, bool) {
    match (metric.produce)(session) {
        Ok(value) => (value, false),
        Err(e) => {
            tracing::warn!(metric = metric.name, error = %e, "metric degraded to zero");
            (metric.kind.zero(), true)
        }
    }
}
