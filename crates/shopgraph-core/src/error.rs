//! Centralized error types for shopgraph.

use thiserror::Error;

/// Main error type for shopgraph operations.
#[derive(Error, Debug)]
pub enum ShopgraphError {
    #[error("{service} did not become ready after {attempts} attempts")]
    ReadinessTimeout { service: String, attempts: u32 },

    #[error("Unknown event kind: {0}")]
    UnknownEventKind(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for shopgraph operations.
pub type ShopgraphResult<T> = Result<T, ShopgraphError>;

impl ShopgraphError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
