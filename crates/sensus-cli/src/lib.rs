//! Operator CLI for the congregation census store.

pub mod commands;
pub mod error;
pub mod handler;

pub use commands::{Cli, Commands};
pub use error::{CliError, CliResult};
