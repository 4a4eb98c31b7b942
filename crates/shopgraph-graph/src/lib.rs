//! # Shopgraph Graph
//!
//! Neo4j side of shopgraph.
//!
//! Provides the shared graph client, schema bootstrap from a Cypher
//! script, the bulk load of a relational snapshot into nodes and
//! relationships, and the recommendation traversals.

pub mod client;
pub mod load;
pub mod migrate;
pub mod queries;
pub mod schema;

pub use client::{GraphClient, GraphConfig, GraphCounts, LabelCount};
pub use load::{LoadOptions, LoadReport, run_full_load};
pub use migrate::{MigrationOptions, run_migration};
