//! Order nodes, `PLACED` edges and `CONTAINS` edges.

use anyhow::Result;
use shopgraph_core::model::{Order, OrderItem};
use shopgraph_core::timefmt;

use super::{BoltRow, LoadOptions, row_with_id, run_unwind};
use crate::GraphClient;

const MERGE_ORDERS: &str = "
    UNWIND $rows AS r
    MERGE (o:Order {id: r.id})
    SET o.ts = r.ts
    WITH o, r
    MATCH (c:Customer {id: r.customer_id})
    MERGE (c)-[:PLACED]->(o)";

// One CONTAINS per (order, product); a re-run updates the quantity.
const MERGE_ORDER_ITEMS: &str = "
    UNWIND $rows AS r
    MATCH (o:Order {id: r.order_id})
    MATCH (p:Product {id: r.product_id})
    MERGE (o)-[rel:CONTAINS]->(p)
    SET rel.quantity = r.quantity";

pub async fn load_orders(
    client: &GraphClient,
    orders: &[Order],
    options: &LoadOptions,
) -> Result<usize> {
    let rows = orders.iter().map(order_row).collect();
    run_unwind(client, "orders", MERGE_ORDERS, rows, options).await
}

pub async fn load_order_items(
    client: &GraphClient,
    items: &[OrderItem],
    options: &LoadOptions,
) -> Result<usize> {
    let rows = items.iter().map(order_item_row).collect();
    run_unwind(client, "order_items", MERGE_ORDER_ITEMS, rows, options).await
}

fn order_row(order: &Order) -> BoltRow {
    let mut row = row_with_id(&order.id);
    row.insert("customer_id".to_string(), order.customer_id.as_str().into());
    row.insert("ts".to_string(), timefmt::format_timestamp(&order.ts).into());
    row
}

fn order_item_row(item: &OrderItem) -> BoltRow {
    let mut row = BoltRow::new();
    row.insert("order_id".to_string(), item.order_id.as_str().into());
    row.insert("product_id".to_string(), item.product_id.as_str().into());
    row.insert("quantity".to_string(), item.quantity.into());
    row
}
