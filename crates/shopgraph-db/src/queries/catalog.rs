//! Category and product reads.

use shopgraph_core::model::{Category, Product};
use sqlx::Row;

use super::read_error;
use crate::pool::{DbPool, DbResult};

pub async fn list_categories(pool: &DbPool) -> DbResult<Vec<Category>> {
    let rows = sqlx::query("SELECT id, name FROM categories ORDER BY id")
        .fetch_all(pool)
        .await
        .map_err(read_error("categories"))?;

    rows.iter()
        .map(|row| -> Result<Category, sqlx::Error> {
            Ok(Category {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
            })
        })
        .collect::<Result<Vec<_>, sqlx::Error>>()
        .map_err(read_error("categories"))
}

/// Read every product. `price` is NUMERIC in the source and is cast to
/// float8 server-side so it decodes straight into `f64`.
pub async fn list_products(pool: &DbPool) -> DbResult<Vec<Product>> {
    let rows = sqlx::query(
        "SELECT id, name, price::float8 AS price, category_id FROM products ORDER BY id",
    )
    .fetch_all(pool)
    .await
    .map_err(read_error("products"))?;

    rows.iter()
        .map(|row| -> Result<Product, sqlx::Error> {
            Ok(Product {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
                price: row.try_get("price")?,
                category_id: row.try_get("category_id")?,
            })
        })
        .collect::<Result<Vec<_>, sqlx::Error>>()
        .map_err(read_error("products"))
}
