use clap::Args;

use super::DataArgs;

#[derive(Args, Debug)]
pub struct PathArgs {
    /// Starting employee id
    pub from: String,

    /// Target employee id
    pub to: String,

    #[command(flatten)]
    pub data: DataArgs,
}

pub fn run(args: &PathArgs) -> anyhow::Result<()> {
    let graph = args.data.load()?;
    super::require_employee(&graph, &args.from)?;
    super::require_employee(&graph, &args.to)?;

    let path = graph.shortest_path(&args.from, &args.to);
    if path.is_empty() {
        println!(
            "No collaboration path from {} to {}",
            super::label(&graph, &args.from),
            super::label(&graph, &args.to)
        );
        return Ok(());
    }

    let names: Vec<&str> = path.iter().map(|id| graph.name_of(id.as_str())).collect();
    println!("{}", names.join(" -> "));
    println!("  {} hop{}", path.len() - 1, if path.len() == 2 { "" } else { "s" });
    Ok(())
}
