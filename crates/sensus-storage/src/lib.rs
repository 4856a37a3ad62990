//! SQLite persistence for the congregation census: connections, additive
//! schema evolution, congregant records, and the census aggregation engine.

pub mod aggregation;
pub mod connection;
pub mod errors;
pub mod evolution;
pub mod queries;
pub mod schema;

pub use connection::pool::ReadPool;
pub use connection::DatabaseManager;
