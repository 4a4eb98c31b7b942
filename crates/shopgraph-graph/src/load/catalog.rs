//! Category nodes, product nodes and `IN_CATEGORY` edges.

use anyhow::Result;
use shopgraph_core::model::{Category, Product};

use super::{BoltRow, LoadOptions, row_with_id, run_unwind};
use crate::GraphClient;

const MERGE_CATEGORIES: &str = "
    UNWIND $rows AS r
    MERGE (c:Category {id: r.id})
    SET c.name = r.name";

// A product whose category is missing is still merged; the MATCH just
// drops the row before the edge is created.
const MERGE_PRODUCTS: &str = "
    UNWIND $rows AS r
    MERGE (p:Product {id: r.id})
    SET p.name = r.name,
        p.price = r.price
    WITH p, r
    MATCH (c:Category {id: r.category_id})
    MERGE (p)-[:IN_CATEGORY]->(c)";

pub async fn load_categories(
    client: &GraphClient,
    categories: &[Category],
    options: &LoadOptions,
) -> Result<usize> {
    let rows = categories.iter().map(category_row).collect();
    run_unwind(client, "categories", MERGE_CATEGORIES, rows, options).await
}

pub async fn load_products(
    client: &GraphClient,
    products: &[Product],
    options: &LoadOptions,
) -> Result<usize> {
    let rows = products.iter().map(product_row).collect();
    run_unwind(client, "products", MERGE_PRODUCTS, rows, options).await
}

fn category_row(category: &Category) -> BoltRow {
    let mut row = row_with_id(&category.id);
    row.insert("name".to_string(), category.name.as_str().into());
    row
}

fn product_row(product: &Product) -> BoltRow {
    let mut row = row_with_id(&product.id);
    row.insert("name".to_string(), product.name.as_str().into());
    row.insert("price".to_string(), product.price.into());
    row.insert("category_id".to_string(), product.category_id.clone().into());
    row
}
