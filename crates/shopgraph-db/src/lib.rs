//! Shopgraph Database Layer
//!
//! Connection pool and full-table reads against the PostgreSQL source.
//! Every read returns the whole table as typed records; there is no
//! filtering or pagination.

pub mod pool;
pub mod queries;

pub use pool::{DbConfig, DbError, DbPool, DbResult, init_pool, ping};
pub use queries::read_snapshot;
