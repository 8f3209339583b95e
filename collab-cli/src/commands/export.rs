use std::path::PathBuf;

use anyhow::Context;
use chrono::{Duration, Utc};
use clap::Args;
use tracing::info;

use collab_core::config::CollabConfig;
use collab_core::query::filter;
use collab_core::render::ExportFormat;
use collab_core::types::{Interaction, InteractionKind};

use super::DataArgs;

#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Output format: dot, mermaid (default: export.default_format)
    #[arg(long)]
    pub format: Option<ExportFormat>,

    /// Only include interactions from the last N days
    #[arg(long)]
    pub since_days: Option<u32>,

    /// Only include interactions of these kinds (repeatable)
    #[arg(long = "kind")]
    pub kinds: Vec<InteractionKind>,

    /// Write to a file instead of stdout; the format's extension is added
    /// when the path has none
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run(args: &ExportArgs, config: &CollabConfig) -> anyhow::Result<()> {
    let graph = args.data.load()?;

    let format = args.format.unwrap_or(config.export.default_format);
    let exporter = format.exporter(&config.export);

    let window = args
        .since_days
        .map(|days| filter::within_last(Duration::days(i64::from(days)), Utc::now()));
    let kinds = (!args.kinds.is_empty()).then(|| filter::of_kinds(&args.kinds));
    let accept = |i: &Interaction| {
        window.as_ref().is_none_or(|w| w(i)) && kinds.as_ref().is_none_or(|k| k(i))
    };

    let rendered = if window.is_none() && kinds.is_none() {
        graph.export(exporter.as_ref())
    } else {
        graph.export_filtered(exporter.as_ref(), accept)
    };

    match &args.out {
        Some(path) => {
            let path = if path.extension().is_none() {
                path.with_extension(exporter.file_extension())
            } else {
                path.clone()
            };
            std::fs::write(&path, &rendered)
                .with_context(|| format!("Cannot write {}", path.display()))?;
            info!(exporter = exporter.name(), path = %path.display(), "Exported graph");
            println!("Wrote {} export to {}", format, path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}
