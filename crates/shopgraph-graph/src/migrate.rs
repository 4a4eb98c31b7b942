//! One-shot migration: schema bootstrap, relational read, bulk load.

use std::path::PathBuf;

use anyhow::{Context, Result};
use shopgraph_db::{DbPool, read_snapshot};
use tracing::info;

use crate::load::{LoadOptions, LoadReport, run_full_load};
use crate::schema::{DEFAULT_SCRIPT_PATH, bootstrap_from_script};
use crate::GraphClient;

#[derive(Debug, Clone)]
pub struct MigrationOptions {
    /// Cypher script holding constraints and indexes.
    pub schema_script: PathBuf,
    pub load: LoadOptions,
}

impl Default for MigrationOptions {
    fn default() -> Self {
        Self {
            schema_script: PathBuf::from(DEFAULT_SCRIPT_PATH),
            load: LoadOptions::default(),
        }
    }
}

/// Run the migration against stores that are already reachable.
///
/// The schema is applied before anything is read so the MERGE steps can use
/// the uniqueness constraints.
pub async fn run_migration(
    client: &GraphClient,
    pool: &DbPool,
    options: &MigrationOptions,
) -> Result<LoadReport> {
    let statements = bootstrap_from_script(client, &options.schema_script)
        .await
        .context("Schema bootstrap failed")?;

    let snapshot = read_snapshot(pool)
        .await
        .context("Failed to read relational snapshot")?;
    info!(
        rows = snapshot.total_rows(),
        schema_statements = statements,
        "Relational snapshot read"
    );

    let report = run_full_load(client, &snapshot, &options.load).await?;
    info!(
        rows = report.total_rows(),
        quarantined = report.quarantined_events(),
        elapsed_ms = report.elapsed.as_millis() as u64,
        "Migration complete"
    );

    Ok(report)
}
