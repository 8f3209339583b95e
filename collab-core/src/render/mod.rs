pub mod dot;
pub mod mermaid;
pub mod traits;

use serde::{Deserialize, Serialize};

use crate::config::ExportSection;

pub use dot::DotExporter;
pub use mermaid::MermaidExporter;
pub use traits::Exporter;

/// Which diagram language to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Dot,
    #[default]
    Mermaid,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dot => "dot",
            Self::Mermaid => "mermaid",
        }
    }

    /// Build the exporter for this format, styled by `config`.
    pub fn exporter(self, config: &ExportSection) -> Box<dyn Exporter> {
        match self {
            Self::Dot => Box::new(DotExporter::from_config(config)),
            Self::Mermaid => Box::new(MermaidExporter::from_config(config)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dot" | "graphviz" => Ok(Self::Dot),
            "mermaid" | "mmd" => Ok(Self::Mermaid),
            other => Err(format!("Unknown export format: {other}. Use: dot, mermaid")),
        }
    }
}
