//! Configuration for the census tools.
//! TOML-based, layered: CLI > env > project `sensus.toml` > defaults.

pub mod database_config;
pub mod evolution_config;
pub mod report_config;
pub mod sensus_config;

pub use database_config::DatabaseConfig;
pub use evolution_config::EvolutionConfig;
pub use report_config::ReportConfig;
pub use sensus_config::{CliOverrides, SensusConfig};
