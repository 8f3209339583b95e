use clap::Args;
use serde::Serialize;

use collab_core::config::CollabConfig;

use super::{DataArgs, OutputFormat};

#[derive(Args, Debug)]
pub struct TopArgs {
    /// Employee id
    pub employee: String,

    #[command(flatten)]
    pub data: DataArgs,

    /// How many collaborators to list (default: query.default_top)
    #[arg(long)]
    pub limit: Option<usize>,

    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct RankedEntry<'a> {
    rank: usize,
    id: &'a str,
    name: &'a str,
    weight: u32,
}

pub fn run(args: &TopArgs, config: &CollabConfig) -> anyhow::Result<()> {
    let graph = args.data.load()?;
    super::require_employee(&graph, &args.employee)?;

    let limit = args.limit.unwrap_or(config.query.default_top);
    let ranked = graph.top_collaborators(&args.employee, limit);

    match args.format {
        OutputFormat::Json => {
            let entries: Vec<RankedEntry<'_>> = ranked
                .iter()
                .enumerate()
                .map(|(i, (id, weight))| RankedEntry {
                    rank: i + 1,
                    id: id.as_str(),
                    name: graph.name_of(id.as_str()),
                    weight: *weight,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Text => {
            println!(
                "Top {limit} collaborators of {}:",
                super::label(&graph, &args.employee)
            );
            if ranked.is_empty() {
                println!("  (none)");
            }
            for (i, (id, weight)) in ranked.iter().enumerate() {
                println!(
                    "  {:>2}. {:<32} weight={weight}",
                    i + 1,
                    super::label(&graph, id.as_str())
                );
            }
        }
    }
    Ok(())
}
