//! Live Neo4j tests for the load pipeline and recommendation queries.
//!
//! Run with `cargo test -p shopgraph-graph -- --ignored` against a Neo4j
//! with APOC installed. Connection settings come from `NEO4J_URI`,
//! `NEO4J_USER` and `NEO4J_PASSWORD` (a `.env` file works). Every test
//! writes ids under its own prefix, so runs never collide and nothing is
//! deleted.

use std::env;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{NaiveDate, NaiveDateTime};
use dotenv::dotenv;
use neo4rs::Query;
use shopgraph_core::model::{Category, Customer, Event, Order, OrderItem, Product, Snapshot};
use shopgraph_graph::queries::recommend;
use shopgraph_graph::{GraphClient, GraphConfig, LoadOptions, run_full_load};

async fn test_client() -> GraphClient {
    dotenv().ok();
    let config = GraphConfig::new(
        env::var("NEO4J_URI").unwrap_or_else(|_| "bolt://localhost:7687".to_string()),
        env::var("NEO4J_USER").unwrap_or_else(|_| "neo4j".to_string()),
        env::var("NEO4J_PASSWORD").unwrap_or_else(|_| "password".to_string()),
    );
    GraphClient::connect(&config).await.expect("Neo4j not reachable")
}

fn unique_prefix(test: &str) -> String {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    format!("t{}_{}_", nanos, test)
}

fn ts(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, day).unwrap().and_hms_opt(10, 0, 0).unwrap()
}

/// Snapshot builder that prefixes every id.
struct Fixture {
    prefix: String,
    snapshot: Snapshot,
}

impl Fixture {
    fn new(test: &str) -> Self {
        Self { prefix: unique_prefix(test), snapshot: Snapshot::default() }
    }

    fn id(&self, raw: &str) -> String {
        format!("{}{}", self.prefix, raw)
    }

    fn customer(mut self, id: &str) -> Self {
        let id = self.id(id);
        self.snapshot.customers.push(Customer {
            name: format!("Customer {}", id),
            id,
            join_date: NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
        });
        self
    }

    fn category(mut self, id: &str, name: &str) -> Self {
        let id = self.id(id);
        self.snapshot.categories.push(Category { id, name: name.to_string() });
        self
    }

    fn product(mut self, id: &str, category_id: Option<&str>) -> Self {
        let id = self.id(id);
        let category_id = category_id.map(|c| self.id(c));
        self.snapshot.products.push(Product {
            name: format!("Product {}", id),
            id,
            price: 9.99,
            category_id,
        });
        self
    }

    fn order(mut self, id: &str, customer_id: &str, items: &[(&str, i64)]) -> Self {
        let order_id = self.id(id);
        let customer_id = self.id(customer_id);
        self.snapshot.orders.push(Order { id: order_id.clone(), customer_id, ts: ts(1) });
        for (product, quantity) in items {
            let product_id = self.id(product);
            self.snapshot.order_items.push(OrderItem {
                order_id: order_id.clone(),
                product_id,
                quantity: *quantity,
            });
        }
        self
    }

    fn event(mut self, id: &str, customer_id: &str, product_id: &str, event_type: &str) -> Self {
        let event = Event {
            id: self.id(id),
            customer_id: self.id(customer_id),
            product_id: self.id(product_id),
            event_type: event_type.to_string(),
            ts: ts(2),
        };
        self.snapshot.events.push(event);
        self
    }
}

async fn count(client: &GraphClient, cypher: &str, prefix: &str) -> i64 {
    let query = Query::new(cypher.to_string()).param("prefix", prefix);
    client.query_scalar(query, "count").await.unwrap().unwrap_or(0)
}

async fn prefixed_nodes(client: &GraphClient, prefix: &str) -> i64 {
    count(client, "MATCH (n) WHERE n.id STARTS WITH $prefix RETURN count(n) AS count", prefix).await
}

async fn prefixed_relationships(client: &GraphClient, prefix: &str) -> i64 {
    count(
        client,
        "MATCH (a)-[r]->(b) WHERE a.id STARTS WITH $prefix AND b.id STARTS WITH $prefix
         RETURN count(r) AS count",
        prefix,
    )
    .await
}

fn co_purchase_fixture(test: &str) -> Fixture {
    Fixture::new(test)
        .customer("C1")
        .customer("C2")
        .customer("C3")
        .category("K1", "Kitchen")
        .product("P1", Some("K1"))
        .product("P2", Some("K1"))
        .product("P3", Some("K1"))
        .order("O1", "C1", &[("P1", 1), ("P2", 1)])
        .order("O2", "C2", &[("P1", 1), ("P3", 1)])
        .order("O3", "C3", &[("P2", 1), ("P3", 1)])
}

#[tokio::test]
#[ignore]
async fn test_second_run_changes_no_counts() {
    let client = test_client().await;
    let fixture = co_purchase_fixture("idem")
        .event("E1", "C1", "P3", "view")
        .event("E2", "C1", "P3", "click")
        .event("E3", "C2", "P2", "wishlist");

    let first = run_full_load(&client, &fixture.snapshot, &LoadOptions::default()).await.unwrap();
    let nodes = prefixed_nodes(&client, &fixture.prefix).await;
    let rels = prefixed_relationships(&client, &fixture.prefix).await;

    let second = run_full_load(&client, &fixture.snapshot, &LoadOptions { batch_size: Some(2) })
        .await
        .unwrap();

    assert_eq!(prefixed_nodes(&client, &fixture.prefix).await, nodes);
    assert_eq!(prefixed_relationships(&client, &fixture.prefix).await, rels);
    assert_eq!(first.events, 2);
    assert_eq!(second.quarantined.get("WISHLIST"), Some(&1));
    // 3 customers, 1 category, 3 products, 3 orders
    assert_eq!(nodes, 10);
    // 3 IN_CATEGORY, 3 PLACED, 6 CONTAINS, 2 events
    assert_eq!(rels, 14);
}

#[tokio::test]
#[ignore]
async fn test_product_has_category_edge_only_when_category_exists() {
    let client = test_client().await;
    let fixture = Fixture::new("refs")
        .category("K1", "Garden")
        .product("P1", Some("K1"))
        .product("P2", Some("K404"))
        .product("P3", None);

    run_full_load(&client, &fixture.snapshot, &LoadOptions::default()).await.unwrap();

    let with_edge = count(
        &client,
        "MATCH (p:Product)-[:IN_CATEGORY]->(:Category) WHERE p.id STARTS WITH $prefix
         RETURN count(p) AS count",
        &fixture.prefix,
    )
    .await;
    let products = count(
        &client,
        "MATCH (p:Product) WHERE p.id STARTS WITH $prefix RETURN count(p) AS count",
        &fixture.prefix,
    )
    .await;

    assert_eq!(products, 3);
    assert_eq!(with_edge, 1);
}

#[tokio::test]
#[ignore]
async fn test_changed_quantity_updates_contains_edge() {
    let client = test_client().await;
    let mut fixture = Fixture::new("qty")
        .customer("C1")
        .product("P1", None)
        .order("O1", "C1", &[("P1", 2)]);

    run_full_load(&client, &fixture.snapshot, &LoadOptions::default()).await.unwrap();
    fixture.snapshot.order_items[0].quantity = 5;
    run_full_load(&client, &fixture.snapshot, &LoadOptions::default()).await.unwrap();

    let query = Query::new(
        "MATCH (:Order {id: $order})-[r:CONTAINS]->(:Product {id: $product})
         RETURN count(r) AS edges, max(r.quantity) AS quantity"
            .to_string(),
    )
    .param("order", fixture.id("O1"))
    .param("product", fixture.id("P1"));
    let rows = client.query(query).await.unwrap();
    let edges: i64 = rows[0].get("edges").unwrap();
    let quantity: i64 = rows[0].get("quantity").unwrap();

    assert_eq!(edges, 1);
    assert_eq!(quantity, 5);
}

#[tokio::test]
#[ignore]
async fn test_product_recommendations_rank_co_purchases() {
    let client = test_client().await;
    let fixture = co_purchase_fixture("rank");
    run_full_load(&client, &fixture.snapshot, &LoadOptions::default()).await.unwrap();

    let recs = recommend::for_product(&client, &fixture.id("P1"), 10).await.unwrap();

    let mut ids: Vec<_> = recs.iter().map(|r| r.product_id.clone()).collect();
    ids.sort();
    assert_eq!(ids, vec![fixture.id("P2"), fixture.id("P3")]);
    assert!(recs.iter().all(|r| r.score == 1));
}

#[tokio::test]
#[ignore]
async fn test_customer_recommendations_exclude_purchases() {
    let client = test_client().await;
    let fixture = co_purchase_fixture("excl");
    run_full_load(&client, &fixture.snapshot, &LoadOptions::default()).await.unwrap();

    let recs = recommend::for_customer(&client, &fixture.id("C1"), 5).await.unwrap();

    let ids: Vec<_> = recs.iter().map(|r| r.product_id.clone()).collect();
    assert_eq!(ids, vec![fixture.id("P3")]);
    assert!(recs[0].score >= 1);
}

#[tokio::test]
#[ignore]
async fn test_category_recommendations_follow_interactions() {
    let client = test_client().await;
    let fixture = Fixture::new("cat")
        .customer("C1")
        .category("K1", "Books")
        .category("K2", "Toys")
        .product("P1", Some("K1"))
        .product("P2", Some("K1"))
        .product("P3", Some("K1"))
        .product("P4", Some("K2"))
        .order("O1", "C1", &[("P2", 1)])
        .event("E1", "C1", "P1", "VIEW")
        .event("E2", "C1", "P1", "ADD_TO_CART");
    run_full_load(&client, &fixture.snapshot, &LoadOptions::default()).await.unwrap();

    let recs = recommend::for_category(&client, &fixture.id("C1"), 10).await.unwrap();

    let mut ids: Vec<_> = recs.iter().map(|r| r.product_id.clone()).collect();
    ids.sort();
    assert_eq!(ids, vec![fixture.id("P1"), fixture.id("P3")]);
    assert!(recs.iter().all(|r| r.category == "Books"));
    assert!(recs.iter().all(|r| r.score == 2));
}

/// C1 bought P0 and viewed it. C2 bought P0..P7 together, all in one
/// category, so each endpoint has seven candidates for its seed.
fn wide_fixture(test: &str) -> Fixture {
    let products: Vec<String> = (0..8).map(|i| format!("P{}", i)).collect();
    let mut fixture = Fixture::new(test)
        .customer("C1")
        .customer("C2")
        .category("K1", "Kitchen");
    for product in &products {
        fixture = fixture.product(product, Some("K1"));
    }
    let basket: Vec<(&str, i64)> = products.iter().map(|p| (p.as_str(), 1)).collect();
    fixture
        .order("O1", "C1", &[("P0", 1)])
        .order("O2", "C2", &basket)
        .event("E1", "C1", "P0", "view")
}

const LIMIT_CASES: [(u32, usize); 4] = [(0, 0), (1, 1), (5, 5), (100, 7)];

#[tokio::test]
#[ignore]
async fn test_limits_cap_product_results() {
    let client = test_client().await;
    let fixture = wide_fixture("limit_product");
    run_full_load(&client, &fixture.snapshot, &LoadOptions::default()).await.unwrap();

    for (limit, expected) in LIMIT_CASES {
        let recs = recommend::for_product(&client, &fixture.id("P0"), limit).await.unwrap();
        assert_eq!(recs.len(), expected, "limit {}", limit);
    }
}

#[tokio::test]
#[ignore]
async fn test_limits_cap_customer_results() {
    let client = test_client().await;
    let fixture = wide_fixture("limit_customer");
    run_full_load(&client, &fixture.snapshot, &LoadOptions::default()).await.unwrap();

    for (limit, expected) in LIMIT_CASES {
        let recs = recommend::for_customer(&client, &fixture.id("C1"), limit).await.unwrap();
        assert_eq!(recs.len(), expected, "limit {}", limit);
        assert!(recs.iter().all(|r| r.product_id != fixture.id("P0")));
    }
}

#[tokio::test]
#[ignore]
async fn test_limits_cap_category_results() {
    let client = test_client().await;
    let fixture = wide_fixture("limit_category");
    run_full_load(&client, &fixture.snapshot, &LoadOptions::default()).await.unwrap();

    for (limit, expected) in LIMIT_CASES {
        let recs = recommend::for_category(&client, &fixture.id("C1"), limit).await.unwrap();
        assert_eq!(recs.len(), expected, "limit {}", limit);
        assert!(recs.iter().all(|r| r.category == "Kitchen"));
    }
}

#[tokio::test]
#[ignore]
async fn test_ping_fails_when_unreachable() {
    let config = GraphConfig::new("bolt://127.0.0.1:1", "neo4j", "password");
    let client = GraphClient::open(&config).await.unwrap();
    assert!(client.ping().await.is_err());
}
