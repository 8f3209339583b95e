use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::Args;

use collab_core::sample::eight_employee_sample;

#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Where to write the snapshot document
    #[arg(long, default_value = "collab.json")]
    pub out: PathBuf,
}

pub fn run(args: &DemoArgs) -> anyhow::Result<()> {
    let graph = eight_employee_sample(Utc::now()).context("Failed to build sample graph")?;
    super::write_graph(&graph, &args.out)?;

    let stats = graph.stats();
    println!(
        "Wrote sample graph to {} ({} employees, {} chat identities, {} interactions)",
        args.out.display(),
        stats.employees,
        stats.chat_identities,
        stats.interactions
    );
    Ok(())
}
