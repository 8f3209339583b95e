use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Args;

use collab_core::types::{InteractionKind, RecordOutcome};

use super::DataArgs;

#[derive(Args, Debug)]
pub struct RecordArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Issue key, e.g. BUG-77
    #[arg(long)]
    pub issue: String,

    /// First participant
    #[arg(long)]
    pub from: String,

    /// Second participant
    #[arg(long)]
    pub to: String,

    /// Interaction kind: issue, bug, code-review, discussion
    #[arg(long)]
    pub kind: InteractionKind,

    /// RFC 3339 timestamp (default: now)
    #[arg(long)]
    pub at: Option<DateTime<Utc>>,

    /// Treat --from/--to as chat identity ids instead of employee ids
    #[arg(long)]
    pub by_identity: bool,
}

pub fn run(args: &RecordArgs) -> anyhow::Result<()> {
    let mut graph = args.data.load()?;
    let timestamp = args.at.unwrap_or_else(Utc::now);

    let outcome = if args.by_identity {
        graph.record_interaction_by_identity(
            args.issue.as_str(),
            &args.from,
            &args.to,
            args.kind,
            timestamp,
        )
    } else {
        graph.record_interaction_by_employee(
            args.issue.as_str(),
            &args.from,
            &args.to,
            args.kind,
            timestamp,
        )
    }
    .with_context(|| format!("Cannot record {}", args.issue))?;

    match outcome {
        RecordOutcome::Recorded => {
            super::write_graph(&graph, &args.data.data)?;
            println!(
                "Recorded {} {} between {} and {}",
                args.kind, args.issue, args.from, args.to
            );
        }
        RecordOutcome::IgnoredSelfInteraction => {
            println!("Ignored {}: both participants are the same employee", args.issue);
        }
    }
    Ok(())
}
