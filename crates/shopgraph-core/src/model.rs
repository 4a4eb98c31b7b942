//! Relational source records.
//!
//! One struct per source table, with the column types already decoded.
//! Date and time columns stay typed here; they are turned into text only
//! when a row is handed to the graph.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub join_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub category_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub customer_id: String,
    pub ts: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub order_id: String,
    pub product_id: String,
    pub quantity: i64,
}

/// A customer event as stored in the source, with the raw event type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub customer_id: String,
    pub product_id: String,
    pub event_type: String,
    pub ts: NaiveDateTime,
}

/// Full in-memory snapshot of the six source tables.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub customers: Vec<Customer>,
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub order_items: Vec<OrderItem>,
    pub events: Vec<Event>,
}

impl Snapshot {
    /// Total number of source rows.
    pub fn total_rows(&self) -> usize {
        self.customers.len()
            + self.categories.len()
            + self.products.len()
            + self.orders.len()
            + self.order_items.len()
            + self.events.len()
    }
}
