//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use shopgraph_db::DbConfig;
use shopgraph_graph::GraphConfig;
use std::path::PathBuf;

pub mod graph;
pub mod migrate;
pub mod serve;

/// Shopgraph - relational shop data as a recommendation graph
#[derive(Parser)]
#[command(name = "shopgraph")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Also append logs to this file
    #[arg(long, global = true, env = "SHOPGRAPH_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Copy the relational snapshot into Neo4j
    Migrate(migrate::MigrateArgs),

    /// Start the recommendation HTTP service
    Serve(serve::ServeArgs),

    /// Knowledge Graph commands
    #[command(subcommand)]
    Graph(graph::GraphCommands),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Migrate(args) => migrate::execute(args).await,
            Commands::Serve(args) => serve::execute(args).await,
            Commands::Graph(cmd) => graph::execute(cmd).await,
        }
    }
}

/// Neo4j connection settings.
#[derive(Args, Debug, Clone)]
pub struct GraphArgs {
    /// Bolt URI
    #[arg(long, env = "NEO4J_URI", default_value = "bolt://localhost:7687")]
    pub neo4j_uri: String,

    #[arg(long, env = "NEO4J_USER", default_value = "neo4j")]
    pub neo4j_user: String,

    #[arg(long, env = "NEO4J_PASSWORD", default_value = "password", hide_env_values = true)]
    pub neo4j_password: String,
}

impl GraphArgs {
    pub fn config(&self) -> GraphConfig {
        GraphConfig::new(&self.neo4j_uri, &self.neo4j_user, &self.neo4j_password)
    }
}

/// PostgreSQL connection settings.
#[derive(Args, Debug, Clone)]
pub struct PostgresArgs {
    #[arg(long, env = "POSTGRES_DSN", default_value = shopgraph_db::pool::DEFAULT_DSN, hide_env_values = true)]
    pub postgres_dsn: String,
}

impl PostgresArgs {
    pub fn config(&self) -> DbConfig {
        DbConfig::new(&self.postgres_dsn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_migrate_needs_no_arguments() {
        let cli = Cli::try_parse_from(["shopgraph", "migrate"]).unwrap();
        match cli.command {
            Commands::Migrate(args) => {
                assert_eq!(args.batch_size, None);
                assert_eq!(args.max_wait_attempts, None);
            }
            _ => panic!("expected migrate"),
        }
    }

    #[test]
    fn test_serve_flags_override_defaults() {
        let cli = Cli::try_parse_from(["shopgraph", "serve", "--port", "9000", "--host", "127.0.0.1"]).unwrap();
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.port, 9000);
                assert_eq!(args.host, "127.0.0.1");
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_graph_status_parses() {
        let cli = Cli::try_parse_from(["shopgraph", "graph", "status", "--neo4j-uri", "bolt://db:7687"]).unwrap();
        match cli.command {
            Commands::Graph(graph::GraphCommands::Status(args)) => {
                assert_eq!(args.config().uri, "bolt://db:7687");
            }
            _ => panic!("expected graph status"),
        }
    }
}
