//! Query modules for each domain table.

pub mod congregants;
