use chrono::{Duration, Utc};
use clap::Args;
use serde::Serialize;

use collab_core::config::CollabConfig;
use collab_core::query::filter;
use collab_core::types::AdjacencyRow;

use super::{DataArgs, OutputFormat};

#[derive(Args, Debug)]
pub struct NeighborsArgs {
    /// Employee id
    pub employee: String,

    #[command(flatten)]
    pub data: DataArgs,

    /// Only count interactions from the last N days
    #[arg(long, conflicts_with = "recent")]
    pub since_days: Option<u32>,

    /// Only count interactions inside the configured recent window
    #[arg(long)]
    pub recent: bool,

    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct NeighborEntry<'a> {
    id: &'a str,
    name: &'a str,
    weight: u32,
}

pub fn run(args: &NeighborsArgs, config: &CollabConfig) -> anyhow::Result<()> {
    let graph = args.data.load()?;
    super::require_employee(&graph, &args.employee)?;

    let days = args
        .since_days
        .or(args.recent.then_some(config.window.default_days));
    let row: AdjacencyRow = match days {
        Some(days) => {
            let window = filter::within_last(Duration::days(i64::from(days)), Utc::now());
            graph
                .filtered_adjacency(window)
                .remove(args.employee.as_str())
                .unwrap_or_default()
        }
        None => graph.neighbors(&args.employee),
    };

    match args.format {
        OutputFormat::Json => {
            let entries: Vec<NeighborEntry<'_>> = row
                .iter()
                .map(|(id, weight)| NeighborEntry {
                    id: id.as_str(),
                    name: graph.name_of(id.as_str()),
                    weight: *weight,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Text => {
            let window = days.map_or_else(String::new, |d| format!(" (last {d} days)"));
            println!(
                "Neighbors of {}{window}:",
                super::label(&graph, &args.employee)
            );
            if row.is_empty() {
                println!("  (none)");
            }
            for (id, weight) in &row {
                println!("  {:<32} weight={weight}", super::label(&graph, id.as_str()));
            }
        }
    }
    Ok(())
}
