//! `sensus schema`

use std::io::Write;

use sensus_core::config::SensusConfig;
use sensus_core::constants::CONGREGANTS_TABLE;
use sensus_storage::{schema, ReadPool};

use crate::error::CliResult;

pub fn run<W: Write>(config: &SensusConfig, out: &mut W) -> CliResult<()> {
    let readers = ReadPool::open(&config.database.effective_path(), 1)?;
    let columns = readers.with_conn(|conn| schema::table_columns(conn, CONGREGANTS_TABLE))?;
    for c in columns {
        let null = if c.not_null { " NOT NULL" } else { "" };
        let default = c
            .default_sql
            .map(|d| format!(" DEFAULT {d}"))
            .unwrap_or_default();
        writeln!(out, "{} {}{null}{default}", c.name, c.declared_type)?;
    }
    Ok(())
}
