pub mod demo;
pub mod export;
pub mod neighbors;
pub mod path;
pub mod record;
pub mod stats;
pub mod top;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Subcommand, ValueEnum};
use tracing::{debug, info};

use collab_core::CollaborationGraph;
use collab_core::config::{CONFIG_FILE_NAME, CollabConfig};
use collab_core::document::deserialize_with_report;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write the eight-employee sample graph to a data file
    Demo(demo::DemoArgs),
    /// List an employee's collaborators and interaction counts
    Neighbors(neighbors::NeighborsArgs),
    /// Rank an employee's strongest collaborators
    Top(top::TopArgs),
    /// Shortest collaboration chain between two employees
    Path(path::PathArgs),
    /// Render the graph as Graphviz DOT or Mermaid
    Export(export::ExportArgs),
    /// Summary counts for the graph
    Stats(stats::StatsArgs),
    /// Append one interaction and rewrite the data file
    Record(record::RecordArgs),
}

pub fn run(cmd: Command, config_path: Option<&Path>) -> anyhow::Result<()> {
    match cmd {
        Command::Demo(args) => demo::run(&args),
        Command::Neighbors(args) => {
            let config = load_config(config_path, &args.data.data)?;
            neighbors::run(&args, &config)
        }
        Command::Top(args) => {
            let config = load_config(config_path, &args.data.data)?;
            top::run(&args, &config)
        }
        Command::Path(args) => path::run(&args),
        Command::Export(args) => {
            let config = load_config(config_path, &args.data.data)?;
            export::run(&args, &config)
        }
        Command::Stats(args) => stats::run(&args),
        Command::Record(args) => record::run(&args),
    }
}

/// The snapshot document a command reads.
#[derive(Args, Debug)]
pub struct DataArgs {
    /// Snapshot document to read
    #[arg(long, default_value = "collab.json", env = "COLLAB_DATA")]
    pub data: PathBuf,
}

impl DataArgs {
    pub fn load(&self) -> anyhow::Result<CollaborationGraph> {
        load_graph(&self.data)
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Resolve configuration: an explicit path must exist, otherwise
/// `collab.toml` beside the data file is used when present.
pub fn load_config(explicit: Option<&Path>, data: &Path) -> anyhow::Result<CollabConfig> {
    if let Some(path) = explicit {
        return CollabConfig::load(path)
            .with_context(|| format!("Cannot load config: {}", path.display()));
    }

    let beside_data = data
        .parent()
        .map_or_else(|| PathBuf::from(CONFIG_FILE_NAME), |dir| dir.join(CONFIG_FILE_NAME));
    if beside_data.exists() {
        debug!(path = %beside_data.display(), "Using config file");
        return CollabConfig::load(&beside_data)
            .with_context(|| format!("Cannot load config: {}", beside_data.display()));
    }
    Ok(CollabConfig::default())
}

pub fn load_graph(path: &Path) -> anyhow::Result<CollaborationGraph> {
    if !path.exists() {
        anyhow::bail!(
            "Data file not found: {}. Run `collab demo --out {}` first.",
            path.display(),
            path.display()
        );
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    let (graph, report) = deserialize_with_report(&text)
        .with_context(|| format!("Cannot load {}", path.display()))?;
    if report.total_skipped() > 0 {
        info!(
            skipped = report.total_skipped(),
            path = %path.display(),
            "Some records were skipped while loading"
        );
    }
    Ok(graph)
}

pub fn write_graph(graph: &CollaborationGraph, path: &Path) -> anyhow::Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create directory {}", dir.display()))?;
    }
    std::fs::write(path, graph.serialize())
        .with_context(|| format!("Cannot write {}", path.display()))?;
    debug!(path = %path.display(), "Wrote snapshot document");
    Ok(())
}

/// Fail with the typed error when `id` is not a registered employee.
pub fn require_employee(graph: &CollaborationGraph, id: &str) -> anyhow::Result<()> {
    if graph.contains_employee(id) {
        Ok(())
    } else {
        Err(collab_core::error::GraphError::UnknownEmployee(id.to_string()).into())
    }
}

/// `"Name (id)"` for display.
pub fn label(graph: &CollaborationGraph, id: &str) -> String {
    format!("{} ({id})", graph.name_of(id))
}
