//! Neo4j connection client.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use neo4rs::{ConfigBuilder, Graph, Query};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Configuration for connecting to Neo4j.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub db: String,
    pub max_connections: usize,
    pub fetch_size: usize,
    /// Upper bound for a liveness round-trip. neo4rs retries refused
    /// connections with backoff for much longer than this.
    pub ping_timeout: Duration,
    /// Upper bound for interactive reads (recommendations).
    pub read_timeout: Duration,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: "password".to_string(),
            db: "neo4j".to_string(),
            max_connections: 16,
            fetch_size: 200,
            ping_timeout: Duration::from_secs(3),
            read_timeout: Duration::from_secs(10),
        }
    }
}

impl GraphConfig {
    pub fn new(uri: impl Into<String>, user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            user: user.into(),
            password: password.into(),
            ..Self::default()
        }
    }
}

/// Client for Neo4j operations.
///
/// Wraps a neo4rs `Graph`, which owns the connection pool. Cloning the
/// client clones the pool handle, so one client is built per process and
/// handed to every component that needs the graph.
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
    ping_timeout: Duration,
    read_timeout: Duration,
}

impl GraphClient {
    /// Build the client without touching the server.
    ///
    /// neo4rs creates its deadpool lazily: no bolt connection exists until
    /// the first query. The query service starts this way so it can come up
    /// (and report `ok: false`) while Neo4j is still down.
    pub async fn open(config: &GraphConfig) -> Result<Self> {
        let neo4j_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .db(config.db.as_str())
            .max_connections(config.max_connections)
            .fetch_size(config.fetch_size)
            .build()
            .context("Failed to build Neo4j config")?;

        let graph = Graph::connect(neo4j_config)
            .await
            .context("Failed to create Neo4j connection pool")?;

        Ok(Self {
            graph,
            ping_timeout: config.ping_timeout,
            read_timeout: config.read_timeout,
        })
    }

    /// Build the client and force a real round-trip.
    pub async fn connect(config: &GraphConfig) -> Result<Self> {
        let client = Self::open(config).await?;
        client.ping().await?;
        Ok(client)
    }

    /// Trivial round-trip (`RETURN 1`), bounded by the ping timeout.
    pub async fn ping(&self) -> Result<()> {
        let round_trip = self.graph.run(Query::new("RETURN 1 AS ok".to_string()));
        tokio::time::timeout(self.ping_timeout, round_trip)
            .await
            .map_err(|_| anyhow!("Neo4j did not answer within {:?}", self.ping_timeout))?
            .context("Neo4j is not responding to queries")?;
        Ok(())
    }

    /// Run a statement whose result is not needed.
    pub async fn execute(&self, query: Query) -> Result<()> {
        self.graph
            .run(query)
            .await
            .context("Neo4j statement failed")
    }

    /// Execute a Cypher query and collect every row.
    pub async fn query(&self, query: Query) -> Result<Vec<neo4rs::Row>> {
        let mut stream = self.graph.execute(query).await.context("Neo4j query failed")?;

        let mut rows = Vec::new();
        while let Some(row) = stream.next().await.context("Failed to fetch Neo4j row")? {
            rows.push(row);
        }
        Ok(rows)
    }

    /// Like [`GraphClient::query`], but gives up after the read timeout.
    pub async fn read(&self, query: Query) -> Result<Vec<neo4rs::Row>> {
        tokio::time::timeout(self.read_timeout, self.query(query))
            .await
            .map_err(|_| anyhow!("Neo4j read did not finish within {:?}", self.read_timeout))?
    }

    /// First row's `field`, or `None` when the query returns nothing.
    pub async fn query_scalar<T: DeserializeOwned>(&self, query: Query, field: &str) -> Result<Option<T>> {
        let Some(row) = self.query(query).await?.into_iter().next() else {
            return Ok(None);
        };
        row.get(field)
            .map(Some)
            .map_err(|e| anyhow!("Missing field '{}' in Neo4j row: {:?}", field, e))
    }

    /// Node and relationship totals, plus a breakdown per label and type.
    pub async fn get_counts(&self) -> Result<GraphCounts> {
        let nodes = self.total("MATCH (n) RETURN count(n) AS count").await?;
        let relationships = self.total("MATCH ()-[r]->() RETURN count(r) AS count").await?;

        let labels = self.count_by(
            "MATCH (n) UNWIND labels(n) AS name RETURN name, count(*) AS count ORDER BY name",
        ).await?;
        let relationship_types = self.count_by(
            "MATCH ()-[r]->() RETURN type(r) AS name, count(*) AS count ORDER BY name",
        ).await?;

        Ok(GraphCounts {
            nodes,
            relationships,
            labels,
            relationship_types,
        })
    }

    async fn total(&self, cypher: &str) -> Result<usize> {
        let count: i64 = self
            .query_scalar(Query::new(cypher.to_string()), "count")
            .await?
            .unwrap_or(0);
        Ok(to_count(count))
    }

    async fn count_by(&self, cypher: &str) -> Result<Vec<LabelCount>> {
        let rows = self.query(Query::new(cypher.to_string())).await?;
        let mut counts = Vec::with_capacity(rows.len());
        for row in rows {
            let name: String = row.get("name").unwrap_or_default();
            let count: i64 = row.get("count").unwrap_or(0);
            counts.push(LabelCount { name, count: to_count(count) });
        }
        Ok(counts)
    }
}

/// Cypher `count()` is never negative; anything unrepresentable reads as 0.
fn to_count(raw: i64) -> usize {
    usize::try_from(raw).unwrap_or(0)
}

/// Node and relationship counts.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GraphCounts {
    pub nodes: usize,
    pub relationships: usize,
    pub labels: Vec<LabelCount>,
    pub relationship_types: Vec<LabelCount>,
}

impl GraphCounts {
    /// Count for one node label, 0 when absent.
    pub fn label(&self, name: &str) -> usize {
        self.labels.iter().find(|c| c.name == name).map_or(0, |c| c.count)
    }

    /// Count for one relationship type, 0 when absent.
    pub fn relationship_type(&self, name: &str) -> usize {
        self.relationship_types.iter().find(|c| c.name == name).map_or(0, |c| c.count)
    }
}

/// Count of nodes with a label or relationships of a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    pub name: String,
    pub count: usize,
}
