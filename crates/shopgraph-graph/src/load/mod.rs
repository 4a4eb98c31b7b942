//! Relational snapshot to Neo4j load pipeline.
//!
//! Each entity is written with one `UNWIND $rows` upsert, so the server
//! iterates the batch. Steps run in a fixed order because the later ones
//! MATCH nodes merged by the earlier ones:
//!
//! 1. `(:Customer)`
//! 2. `(:Category)`
//! 3. `(:Product)-[:IN_CATEGORY]->(:Category)`
//! 4. `(:Customer)-[:PLACED]->(:Order)`
//! 5. `(:Order)-[:CONTAINS]->(:Product)`
//! 6. `(:Customer)-[:VIEW|CLICK|ADD_TO_CART]->(:Product)`

pub mod catalog;
pub mod customers;
pub mod events;
pub mod orders;

use std::collections::{BTreeMap, HashMap};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use neo4rs::{BoltType, Query};
use shopgraph_core::model::Snapshot;
use tracing::{debug, info};

use crate::GraphClient;

/// One row of an `UNWIND $rows` parameter.
pub type BoltRow = HashMap<String, BoltType>;

/// Knobs for the bulk load.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Rows per round-trip. `None` sends each entity in a single round-trip.
    pub batch_size: Option<usize>,
}

/// What a load run wrote.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub customers: usize,
    pub categories: usize,
    pub products: usize,
    pub orders: usize,
    pub order_items: usize,
    pub events: usize,
    /// Raw (normalized) event type -> number of events skipped.
    pub quarantined: BTreeMap<String, usize>,
    pub elapsed: Duration,
}

impl LoadReport {
    pub fn quarantined_events(&self) -> usize {
        self.quarantined.values().sum()
    }

    pub fn total_rows(&self) -> usize {
        self.customers
            + self.categories
            + self.products
            + self.orders
            + self.order_items
            + self.events
    }
}

/// Load a full snapshot into Neo4j. Any failing step aborts the run.
pub async fn run_full_load(
    client: &GraphClient,
    snapshot: &Snapshot,
    options: &LoadOptions,
) -> Result<LoadReport> {
    let start = Instant::now();
    let mut report = LoadReport::default();

    report.customers = customers::load_customers(client, &snapshot.customers, options)
        .await
        .context("Failed to load customers")?;
    info!(rows = report.customers, "Customers merged");

    report.categories = catalog::load_categories(client, &snapshot.categories, options)
        .await
        .context("Failed to load categories")?;
    info!(rows = report.categories, "Categories merged");

    report.products = catalog::load_products(client, &snapshot.products, options)
        .await
        .context("Failed to load products")?;
    info!(rows = report.products, "Products merged");

    report.orders = orders::load_orders(client, &snapshot.orders, options)
        .await
        .context("Failed to load orders")?;
    info!(rows = report.orders, "Orders merged");

    report.order_items = orders::load_order_items(client, &snapshot.order_items, options)
        .await
        .context("Failed to load order items")?;
    info!(rows = report.order_items, "Order items merged");

    let outcome = events::load_events(client, &snapshot.events, options)
        .await
        .context("Failed to load events")?;
    report.events = outcome.loaded;
    report.quarantined = outcome.quarantined;
    info!(rows = report.events, quarantined = report.quarantined_events(), "Events merged");

    report.elapsed = start.elapsed();
    Ok(report)
}

/// Rows per round-trip for a batch of `total` rows.
pub(crate) fn batch_len(total: usize, batch_size: Option<usize>) -> usize {
    match batch_size {
        Some(size) if size > 0 => size,
        _ => total.max(1),
    }
}

/// Send `rows` through `cypher` as `$rows`, in one or more round-trips.
pub(crate) async fn run_unwind(
    client: &GraphClient,
    step: &str,
    cypher: &str,
    rows: Vec<BoltRow>,
    options: &LoadOptions,
) -> Result<usize> {
    if rows.is_empty() {
        debug!(step, "No rows, skipping");
        return Ok(0);
    }

    let total = rows.len();
    let size = batch_len(total, options.batch_size);
    let batches = total.div_ceil(size);

    for (idx, chunk) in rows.chunks(size).enumerate() {
        let query = Query::new(cypher.to_string()).param("rows", chunk.to_vec());
        client
            .execute(query)
            .await
            .with_context(|| format!("{} batch {}/{} failed", step, idx + 1, batches))?;
        debug!(step, batch = idx + 1, batches, "Batch written");
    }

    Ok(total)
}

/// Start a row map with the node's natural key.
pub(crate) fn row_with_id(id: &str) -> BoltRow {
    let mut row = BoltRow::new();
    row.insert("id".to_string(), id.into());
    row
}

#[cfg(test)]
pub(crate) fn string_at(row: &BoltRow, key: &str) -> String {
    match row.get(key) {
        Some(BoltType::String(s)) => s.value.clone(),
        other => panic!("expected string at '{}', got {:?}", key, other),
    }
}
