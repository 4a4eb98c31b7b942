//! Customer reads.

use shopgraph_core::model::Customer;
use sqlx::Row;

use super::read_error;
use crate::pool::{DbPool, DbResult};

/// Read every customer.
pub async fn list_customers(pool: &DbPool) -> DbResult<Vec<Customer>> {
    let rows = sqlx::query("SELECT id, name, join_date FROM customers ORDER BY id")
        .fetch_all(pool)
        .await
        .map_err(read_error("customers"))?;

    rows.iter()
        .map(|row| -> Result<Customer, sqlx::Error> {
            Ok(Customer {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
                join_date: row.try_get("join_date")?,
            })
        })
        .collect::<Result<Vec<_>, sqlx::Error>>()
        .map_err(read_error("customers"))
}
