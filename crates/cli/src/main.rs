//! Lifeclock CLI - Command-line view of the daemon's progress snapshots

mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use lifeclock_core::domain::ProgressSnapshot;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tabled::Table;

const DEFAULT_RPC_URL: &str = "http://127.0.0.1:9530";

#[derive(Parser)]
#[command(name = "lifeclock")]
#[command(about = "Lifeclock time progress CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// RPC server URL
    #[arg(long, env = "LIFECLOCK_RPC_URL", default_value = DEFAULT_RPC_URL)]
    rpc_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the latest published progress
    Status,

    /// Show progress at an arbitrary instant
    At {
        /// RFC 3339 instant (e.g. 2024-05-05T00:00:00+06:00)
        instant: String,
    },

    /// Show daemon statistics
    Stats,
}

#[derive(Serialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    method: String,
    params: serde_json::Value,
    id: u64,
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    #[allow(dead_code)]
    jsonrpc: String,
    #[allow(dead_code)]
    id: u64,
    result: Option<serde_json::Value>,
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

async fn call_rpc(url: &str, method: &str, params: serde_json::Value) -> Result<serde_json::Value> {
    let request = JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        method: method.to_string(),
        params,
        id: 1,
    };

    let client = reqwest::Client::new();
    let response: JsonRpcResponse = client
        .post(url)
        .json(&request)
        .send()
        .await
        .context("Failed to connect to daemon")?
        .json()
        .await
        .context("Failed to parse response")?;

    if let Some(error) = response.error {
        anyhow::bail!("RPC error ({}): {}", error.code, error.message);
    }

    response
        .result
        .ok_or_else(|| anyhow::anyhow!("No result in response"))
}

fn print_snapshot(snapshot: &ProgressSnapshot) {
    println!("{}", render::header(snapshot).cyan().bold());
    println!();

    println!("{}", Table::new(render::period_rows(snapshot)));
    println!();

    println!("{}", format!("Sub-day ({})", snapshot.sub_day.layout).bold());
    for line in render::subday_lines(&snapshot.sub_day) {
        println!("  {} {}", "•".bold(), line);
    }
    println!();

    println!("{} {}", "Life:".bold(), render::life_line(snapshot));
    println!();

    println!("{}", Table::new(render::countdown_rows(snapshot)));
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Status => {
            let result = call_rpc(&cli.rpc_url, "progress.snapshot.v1", json!({})).await?;
            let snapshot: ProgressSnapshot =
                serde_json::from_value(result).context("Unexpected snapshot shape")?;
            print_snapshot(&snapshot);
        }

        Commands::At { instant } => {
            chrono::DateTime::parse_from_rfc3339(&instant)
                .with_context(|| format!("'{}' is not an RFC 3339 instant", instant))?;

            let params = json!({ "instant": instant });
            let result = call_rpc(&cli.rpc_url, "progress.compute.v1", params).await?;
            let snapshot: ProgressSnapshot =
                serde_json::from_value(result).context("Unexpected snapshot shape")?;
            print_snapshot(&snapshot);
        }

        Commands::Stats => {
            println!("{}", "Daemon Status".cyan().bold());
            println!();

            match call_rpc(&cli.rpc_url, "admin.stats.v1", json!({})).await {
                Ok(stats) => {
                    println!("  {} {}", "RPC URL:".bold(), cli.rpc_url);
                    println!("  {} {}", "Status:".bold(), "ONLINE".green());
                    println!("  {} {}", "Version:".bold(), stats["version"]);
                    println!();
                    println!("  {} {}", "Zone:".bold(), stats["zone"]);
                    println!("  {} {}", "Layout:".bold(), stats["layout"]);
                    println!(
                        "  {} {} years",
                        "Life expectancy:".bold(),
                        stats["life_expectancy_years"]
                    );
                    if let Some(birth) = stats["birth_ms"]
                        .as_i64()
                        .and_then(chrono::DateTime::from_timestamp_millis)
                    {
                        println!("  {} {}", "Birth (UTC):".bold(), birth.to_rfc3339());
                    }
                    println!();
                    println!("  {} {} ms", "Tick:".bold(), stats["tick_interval_ms"]);
                    println!(
                        "  {} {}",
                        "Snapshots published:".bold(),
                        stats["snapshots_published"]
                    );
                    println!("  {} {} seconds", "Uptime:".bold(), stats["uptime_seconds"]);
                }
                Err(e) => {
                    println!("  {} {}", "Status:".bold(), "ERROR".red());
                    println!("  {} {}", "Error:".bold(), e);
                }
            }
        }
    }

    Ok(())
}
