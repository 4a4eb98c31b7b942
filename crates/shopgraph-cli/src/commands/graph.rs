//! Knowledge Graph CLI commands.

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use shopgraph_graph::{GraphClient, LabelCount};

use super::GraphArgs;

#[derive(Subcommand)]
pub enum GraphCommands {
    /// Show node and relationship counts
    Status(GraphArgs),
}

pub async fn execute(cmd: GraphCommands) -> Result<()> {
    match cmd {
        GraphCommands::Status(args) => cmd_status(&args).await,
    }
}

/// Show graph status.
async fn cmd_status(args: &GraphArgs) -> Result<()> {
    let client = GraphClient::connect(&args.config()).await?;
    let counts = client.get_counts().await?;

    println!("{} {}", "Knowledge Graph".bold(), args.neo4j_uri.dimmed());
    println!("{}", "─".repeat(40));
    println!("  Nodes:         {}", counts.nodes.to_string().cyan());
    print_breakdown(&counts.labels);
    println!("  Relationships: {}", counts.relationships.to_string().cyan());
    print_breakdown(&counts.relationship_types);

    Ok(())
}

fn print_breakdown(counts: &[LabelCount]) {
    for entry in counts {
        println!("    {:<16} {}", entry.name, entry.count);
    }
}
