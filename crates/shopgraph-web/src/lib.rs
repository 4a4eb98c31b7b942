//! Shopgraph Web Server
//!
//! Axum-based query service over the migrated graph.

pub mod routes;
pub mod state;

use axum::{routing::get, Router};
use serde::Deserialize;
use shopgraph_graph::GraphClient;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use state::AppState;

/// Where the query service listens.
#[derive(Debug, Clone, Deserialize)]
pub struct ServeConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health))
        .route("/recs/{customer_id}", get(routes::recs::for_customer))
        .route("/recs/product/{product_id}", get(routes::recs::for_product))
        .route("/recs/category/{customer_id}", get(routes::recs::for_category))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server until the listener fails.
pub async fn run_server(graph: GraphClient, config: &ServeConfig) -> anyhow::Result<()> {
    let app = create_router(AppState::new(graph));

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!("Web server listening on http://{}:{}", config.host, config.port);

    axum::serve(listener, app).await?;
    Ok(())
}
