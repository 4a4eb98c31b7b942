//! Web server command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use shopgraph_graph::GraphClient;
use shopgraph_web::ServeConfig;

use super::GraphArgs;

#[derive(Args)]
pub struct ServeArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Port to listen on
    #[arg(long, env = "SHOPGRAPH_PORT", default_value = "8000")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "SHOPGRAPH_HOST", default_value = "0.0.0.0")]
    pub host: String,
}

pub async fn execute(args: ServeArgs) -> Result<()> {
    // No round-trip here: /health reports Neo4j availability instead.
    let client = GraphClient::open(&args.graph.config()).await?;
    let config = ServeConfig { host: args.host, port: args.port };

    println!();
    println!("  {} {}", "Shopgraph".cyan().bold(), "Recommendation Service".bold());
    println!();
    println!("  {}   http://{}:{}/health", "Health".green(), config.host, config.port);
    println!("  {}     http://{}:{}/recs/{{customer_id}}", "Recs".green(), config.host, config.port);
    println!("  {}    {}", "Neo4j".green(), args.graph.neo4j_uri);
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    shopgraph_web::run_server(client, &config).await?;

    Ok(())
}
