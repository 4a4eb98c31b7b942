//! Neo4j schema bootstrap (constraints and indexes) from a Cypher script.

use std::path::Path;

use anyhow::{Context, Result};
use neo4rs::Query;
use shopgraph_core::schema_script;
use tracing::{debug, info};

use crate::GraphClient;

/// Default location of the schema script, relative to the working directory.
pub const DEFAULT_SCRIPT_PATH: &str = "assets/queries.cypher";

/// Run the schema statements of the script at `path`.
///
/// A missing script is not an error: the step is skipped. Returns the
/// number of statements executed.
pub async fn bootstrap_from_script(client: &GraphClient, path: &Path) -> Result<usize> {
    if !path.exists() {
        info!(path = %path.display(), "Schema script not found, skipping schema bootstrap");
        return Ok(0);
    }

    let script = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read schema script {}", path.display()))?;

    let statements = schema_script::schema_statements(&script);
    apply_statements(client, &statements).await?;

    info!(path = %path.display(), statements = statements.len(), "Neo4j schema initialized");
    Ok(statements.len())
}

/// Execute each statement once, in order.
pub async fn apply_statements(client: &GraphClient, statements: &[String]) -> Result<()> {
    for statement in statements {
        debug!(statement = %statement, "Applying schema statement");
        client
            .execute(Query::new(statement.clone()))
            .await
            .with_context(|| format!("Schema statement failed: {}", statement))?;
    }
    Ok(())
}
