use clap::Args;

use super::{DataArgs, OutputFormat};

#[derive(Args, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

pub fn run(args: &StatsArgs) -> anyhow::Result<()> {
    let graph = args.data.load()?;
    let stats = graph.stats();

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        OutputFormat::Text => {
            println!("Collaboration graph {}", args.data.data.display());
            println!();
            println!("  Employees:       {:>6}", stats.employees);
            println!("  Chat identities: {:>6}", stats.chat_identities);
            println!("  Interactions:    {:>6}", stats.interactions);
            println!("  Edges:           {:>6}", stats.edges);
            println!("  Total weight:    {:>6}", stats.total_weight);
            println!("  Isolated:        {:>6}", stats.isolated);
            println!("  Components:      {:>6}", stats.components);
        }
    }
    Ok(())
}
