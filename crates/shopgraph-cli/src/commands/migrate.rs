//! Migration command.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use shopgraph_core::{ReadinessPolicy, ShopgraphError, wait_until_ready};
use shopgraph_graph::{GraphClient, LoadOptions, LoadReport, MigrationOptions, run_migration};
use tracing::info;

use super::{GraphArgs, PostgresArgs};

#[derive(Args)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub postgres: PostgresArgs,

    #[command(flatten)]
    pub graph: GraphArgs,

    /// Cypher script with constraints and indexes
    #[arg(long, env = "SHOPGRAPH_SCHEMA_SCRIPT", default_value = shopgraph_graph::schema::DEFAULT_SCRIPT_PATH)]
    pub schema_script: PathBuf,

    /// Rows per round-trip (default: one round-trip per entity)
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Give up waiting for a store after this many failed probes
    #[arg(long)]
    pub max_wait_attempts: Option<u32>,

    /// Seconds between readiness probes
    #[arg(long, default_value = "2")]
    pub wait_interval: u64,
}

pub async fn execute(args: MigrateArgs) -> Result<()> {
    if args.batch_size == Some(0) {
        return Err(ShopgraphError::config("--batch-size must be at least 1").into());
    }

    let policy = ReadinessPolicy::new(Duration::from_secs(args.wait_interval), args.max_wait_attempts);
    info!(
        schema_script = %args.schema_script.display(),
        batch_size = ?args.batch_size,
        max_wait_attempts = ?policy.max_attempts,
        "Starting migration"
    );

    println!("{}", "Waiting for PostgreSQL...".bold());
    let db_config = args.postgres.config();
    let pool = wait_until_ready("postgres", &policy, || shopgraph_db::init_pool(&db_config)).await?;

    println!("{}", "Waiting for Neo4j...".bold());
    let graph_config = args.graph.config();
    let client = wait_until_ready("neo4j", &policy, || GraphClient::connect(&graph_config)).await?;

    println!("{}", "Migrating to Knowledge Graph...".bold());
    let options = MigrationOptions {
        schema_script: args.schema_script,
        load: LoadOptions { batch_size: args.batch_size },
    };
    let report = run_migration(&client, &pool, &options).await?;

    print_report(&report);
    Ok(())
}

fn print_report(report: &LoadReport) {
    println!("\n{}", "Migration complete:".green().bold());
    println!("  {:<14} {}", "Customers", report.customers);
    println!("  {:<14} {}", "Categories", report.categories);
    println!("  {:<14} {}", "Products", report.products);
    println!("  {:<14} {}", "Orders", report.orders);
    println!("  {:<14} {}", "Order items", report.order_items);
    println!("  {:<14} {}", "Events", report.events);

    let quarantined = report.quarantined_events();
    if quarantined > 0 {
        println!(
            "  {:<14} {}",
            "Quarantined".yellow(),
            quarantined.to_string().yellow()
        );
        for (event_type, count) in &report.quarantined {
            println!("    {} {} {}", "→".dimmed(), event_type, format!("({})", count).dimmed());
        }
    }

    println!(
        "\n{} rows in {}",
        report.total_rows().to_string().bold(),
        format!("{:.2}s", report.elapsed.as_secs_f64()).dimmed()
    );
}
