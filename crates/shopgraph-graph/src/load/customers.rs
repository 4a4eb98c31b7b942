//! Customer nodes.

use anyhow::Result;
use shopgraph_core::model::Customer;
use shopgraph_core::timefmt;

use super::{BoltRow, LoadOptions, row_with_id, run_unwind};
use crate::GraphClient;

const MERGE_CUSTOMERS: &str = "
    UNWIND $rows AS r
    MERGE (c:Customer {id: r.id})
    SET c.name = r.name,
        c.join_date = r.join_date";

pub async fn load_customers(
    client: &GraphClient,
    customers: &[Customer],
    options: &LoadOptions,
) -> Result<usize> {
    let rows = customers.iter().map(customer_row).collect();
    run_unwind(client, "customers", MERGE_CUSTOMERS, rows, options).await
}

fn customer_row(customer: &Customer) -> BoltRow {
    let mut row = row_with_id(&customer.id);
    row.insert("name".to_string(), customer.name.as_str().into());
    row.insert("join_date".to_string(), timefmt::format_date(&customer.join_date).into());
    row
}
