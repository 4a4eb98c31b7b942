//! Recommendation queries.
//!
//! All three rank by a plain count of matching paths (co-purchases or
//! interactions). Ties keep whatever order Neo4j returns them in.

use anyhow::Result;
use neo4rs::Query;
use serde::Serialize;
use shopgraph_core::EventKind;

use crate::GraphClient;

pub const DEFAULT_CUSTOMER_LIMIT: u32 = 5;
pub const DEFAULT_PRODUCT_LIMIT: u32 = 10;
pub const DEFAULT_CATEGORY_LIMIT: u32 = 10;

/// A recommended product with its score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub product_id: String,
    pub name: String,
    pub score: i64,
}

/// A category-based recommendation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRecommendation {
    pub product_id: String,
    pub name: String,
    pub category: String,
    pub score: i64,
}

const CUSTOMER_QUERY: &str = "
    MATCH (c:Customer {id: $cid})-[:PLACED]->(:Order)-[:CONTAINS]->(p:Product)
    MATCH (o2:Order)-[:CONTAINS]->(p)
    MATCH (o2)-[:CONTAINS]->(rec:Product)
    WHERE NOT EXISTS { MATCH (c)-[:PLACED]->(:Order)-[:CONTAINS]->(rec) }
    WITH rec, count(*) AS score
    RETURN rec.id AS product_id, rec.name AS name, score
    ORDER BY score DESC
    LIMIT $limit";

const PRODUCT_QUERY: &str = "
    MATCH (:Product {id: $pid})<-[:CONTAINS]-(o:Order)-[:CONTAINS]->(other:Product)
    WHERE other.id <> $pid
    WITH other, count(*) AS score
    RETURN other.id AS product_id, other.name AS name, score
    ORDER BY score DESC
    LIMIT $limit";

/// Products bought alongside what the customer already bought, minus
/// anything the customer bought.
pub async fn for_customer(client: &GraphClient, customer_id: &str, limit: u32) -> Result<Vec<Recommendation>> {
    if limit == 0 {
        return Ok(Vec::new());
    }

    let query = Query::new(CUSTOMER_QUERY.to_string())
        .param("cid", customer_id)
        .param("limit", i64::from(limit));

    Ok(parse_recommendations(client.read(query).await?))
}

/// Products that share orders with the given product.
pub async fn for_product(client: &GraphClient, product_id: &str, limit: u32) -> Result<Vec<Recommendation>> {
    if limit == 0 {
        return Ok(Vec::new());
    }

    let query = Query::new(PRODUCT_QUERY.to_string())
        .param("pid", product_id)
        .param("limit", i64::from(limit));

    Ok(parse_recommendations(client.read(query).await?))
}

/// Products in the categories the customer interacted with, minus anything
/// the customer bought. Every interaction path counts, so repeated views of
/// one product weigh its category more.
pub async fn for_category(client: &GraphClient, customer_id: &str, limit: u32) -> Result<Vec<CategoryRecommendation>> {
    if limit == 0 {
        return Ok(Vec::new());
    }

    let query = Query::new(category_query(&EventKind::INTERACTIONS))
        .param("cid", customer_id)
        .param("limit", i64::from(limit));

    let rows = client.read(query).await?;
    let mut recs = Vec::with_capacity(rows.len());
    for row in rows {
        let product_id: String = row.get("product_id").unwrap_or_default();
        if product_id.is_empty() {
            continue;
        }
        recs.push(CategoryRecommendation {
            product_id,
            name: row.get("name").unwrap_or_default(),
            category: row.get("category").unwrap_or_default(),
            score: row.get("score").unwrap_or(0),
        });
    }
    Ok(recs)
}

fn category_query(kinds: &[EventKind]) -> String {
    format!(
        "MATCH (c:Customer {{id: $cid}})-[:{}]->(p:Product)-[:IN_CATEGORY]->(cat:Category)
         MATCH (rec:Product)-[:IN_CATEGORY]->(cat)
         WHERE NOT EXISTS {{ MATCH (c)-[:PLACED]->(:Order)-[:CONTAINS]->(rec) }}
         RETURN rec.id AS product_id, rec.name AS name, cat.name AS category, count(*) AS score
         ORDER BY score DESC
         LIMIT $limit",
        EventKind::pattern(kinds)
    )
}

/// Parse `product_id, name, score` rows.
fn parse_recommendations(rows: Vec<neo4rs::Row>) -> Vec<Recommendation> {
    let mut recs = Vec::with_capacity(rows.len());

    for row in rows {
        let product_id: String = row.get("product_id").unwrap_or_default();
        if product_id.is_empty() {
            continue;
        }
        recs.push(Recommendation {
            product_id,
            name: row.get("name").unwrap_or_default(),
            score: row.get("score").unwrap_or(0),
        });
    }

    recs
}
