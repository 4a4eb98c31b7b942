//! Application state.

use shopgraph_graph::GraphClient;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub graph: GraphClient,
}

impl AppState {
    pub fn new(graph: GraphClient) -> Self {
        Self { graph }
    }
}
