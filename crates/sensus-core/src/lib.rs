//! Core types, errors, configuration, tracing, and reference data shared by
//! the congregation census storage layer and its operator CLI.

pub mod config;
pub mod constants;
pub mod errors;
pub mod reference;
pub mod tracing;
pub mod types;
