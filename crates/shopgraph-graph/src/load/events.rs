//! Customer → Product event edges.
//!
//! The relationship type comes from the event's kind, so it cannot be
//! written into the query text of a single `UNWIND`. The edge is merged
//! through `apoc.merge.relationship`, keyed on the event id, and the type
//! argument is always an [`EventKind::rel_type`] value. Events whose type
//! is not a known kind are quarantined: left out of the load and reported.

use std::collections::BTreeMap;

use anyhow::Result;
use shopgraph_core::model::Event;
use shopgraph_core::{EventKind, timefmt};
use tracing::warn;

use super::{BoltRow, LoadOptions, row_with_id, run_unwind};
use crate::GraphClient;

const MERGE_EVENTS: &str = "
    UNWIND $rows AS r
    MATCH (c:Customer {id: r.customer_id})
    MATCH (p:Product {id: r.product_id})
    CALL apoc.merge.relationship(c, r.rel_type, {id: r.id}, {ts: r.ts}, p, {ts: r.ts})
    YIELD rel
    RETURN count(rel) AS merged";

/// Result of the event step.
#[derive(Debug, Clone, Default)]
pub struct EventLoadOutcome {
    pub loaded: usize,
    pub quarantined: BTreeMap<String, usize>,
}

pub async fn load_events(
    client: &GraphClient,
    events: &[Event],
    options: &LoadOptions,
) -> Result<EventLoadOutcome> {
    let (known, quarantined) = partition_events(events);

    for (kind, count) in &quarantined {
        warn!(event_type = %kind, count, "Quarantined events with unknown type");
    }

    let rows = known.into_iter().map(|(kind, event)| event_row(kind, event)).collect();
    let loaded = run_unwind(client, "events", MERGE_EVENTS, rows, options).await?;

    Ok(EventLoadOutcome { loaded, quarantined })
}

/// Split events into those with a known kind and per-type counts of the rest.
pub fn partition_events(events: &[Event]) -> (Vec<(EventKind, &Event)>, BTreeMap<String, usize>) {
    let mut known = Vec::with_capacity(events.len());
    let mut quarantined = BTreeMap::new();

    for event in events {
        match EventKind::parse(&event.event_type) {
            Ok(kind) => known.push((kind, event)),
            Err(_) => {
                let raw = event.event_type.trim().to_uppercase();
                *quarantined.entry(raw).or_insert(0) += 1;
            }
        }
    }

    (known, quarantined)
}

fn event_row(kind: EventKind, event: &Event) -> BoltRow {
    let mut row = row_with_id(&event.id);
    row.insert("customer_id".to_string(), event.customer_id.as_str().into());
    row.insert("product_id".to_string(), event.product_id.as_str().into());
    row.insert("rel_type".to_string(), kind.rel_type().into());
    row.insert("ts".to_string(), timefmt::format_timestamp(&event.ts).into());
    row
}
