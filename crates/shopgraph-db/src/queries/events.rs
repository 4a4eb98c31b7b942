//! Customer event reads.
//!
//! The event type is kept raw here; it is validated against the known
//! kinds when the events are loaded into the graph.

use shopgraph_core::model::Event;
use sqlx::Row;

use super::read_error;
use crate::pool::{DbPool, DbResult};

pub async fn list_events(pool: &DbPool) -> DbResult<Vec<Event>> {
    let rows = sqlx::query(
        "SELECT id, customer_id, product_id, event_type, ts FROM events ORDER BY id",
    )
    .fetch_all(pool)
    .await
    .map_err(read_error("events"))?;

    rows.iter()
        .map(|row| -> Result<Event, sqlx::Error> {
            Ok(Event {
                id: row.try_get("id")?,
                customer_id: row.try_get("customer_id")?,
                product_id: row.try_get("product_id")?,
                event_type: row.try_get("event_type")?,
                ts: row.try_get("ts")?,
            })
        })
        .collect::<Result<Vec<_>, sqlx::Error>>()
        .map_err(read_error("events"))
}
