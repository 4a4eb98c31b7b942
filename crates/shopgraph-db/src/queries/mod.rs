//! Full-table reads, one module per source area.

pub mod catalog;
pub mod customers;
pub mod events;
pub mod orders;

use shopgraph_core::model::Snapshot;
use tracing::info;

use crate::pool::{DbError, DbPool, DbResult};

/// Read the six source tables into memory, in load order.
pub async fn read_snapshot(pool: &DbPool) -> DbResult<Snapshot> {
    let customers = customers::list_customers(pool).await?;
    info!(rows = customers.len(), "Read customers");

    let categories = catalog::list_categories(pool).await?;
    info!(rows = categories.len(), "Read categories");

    let products = catalog::list_products(pool).await?;
    info!(rows = products.len(), "Read products");

    let orders = orders::list_orders(pool).await?;
    info!(rows = orders.len(), "Read orders");

    let order_items = orders::list_order_items(pool).await?;
    info!(rows = order_items.len(), "Read order items");

    let events = events::list_events(pool).await?;
    info!(rows = events.len(), "Read events");

    Ok(Snapshot {
        customers,
        categories,
        products,
        orders,
        order_items,
        events,
    })
}

/// Wrap a sqlx error with the table it came from.
pub(crate) fn read_error(table: &'static str) -> impl Fn(sqlx::Error) -> DbError {
    move |source| DbError::Read { table, source }
}
