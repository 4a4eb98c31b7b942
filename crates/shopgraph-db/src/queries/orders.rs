//! Order and order item reads.

use shopgraph_core::model::{Order, OrderItem};
use sqlx::Row;

use super::read_error;
use crate::pool::{DbPool, DbResult};

pub async fn list_orders(pool: &DbPool) -> DbResult<Vec<Order>> {
    let rows = sqlx::query("SELECT id, customer_id, ts FROM orders ORDER BY id")
        .fetch_all(pool)
        .await
        .map_err(read_error("orders"))?;

    rows.iter()
        .map(|row| -> Result<Order, sqlx::Error> {
            Ok(Order {
                id: row.try_get("id")?,
                customer_id: row.try_get("customer_id")?,
                ts: row.try_get("ts")?,
            })
        })
        .collect::<Result<Vec<_>, sqlx::Error>>()
        .map_err(read_error("orders"))
}

pub async fn list_order_items(pool: &DbPool) -> DbResult<Vec<OrderItem>> {
    let rows = sqlx::query(
        "SELECT order_id, product_id, quantity::int8 AS quantity
         FROM order_items
         ORDER BY order_id, product_id",
    )
    .fetch_all(pool)
    .await
    .map_err(read_error("order_items"))?;

    rows.iter()
        .map(|row| -> Result<OrderItem, sqlx::Error> {
            Ok(OrderItem {
                order_id: row.try_get("order_id")?,
                product_id: row.try_get("product_id")?,
                quantity: row.try_get("quantity")?,
            })
        })
        .collect::<Result<Vec<_>, sqlx::Error>>()
        .map_err(read_error("order_items"))
}
