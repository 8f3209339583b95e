use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::render::ExportFormat;

/// Default file name looked up next to the data file.
pub const CONFIG_FILE_NAME: &str = "collab.toml";

const MERMAID_DIRECTIONS: [&str; 5] = ["TD", "TB", "BT", "LR", "RL"];

/// Top-level collab configuration, matching `collab.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollabConfig {
    #[serde(default)]
    pub query: QuerySection,
    #[serde(default)]
    pub window: WindowSection,
    #[serde(default)]
    pub export: ExportSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuerySection {
    /// Collaborators listed by `top` when no limit is given.
    pub default_top: usize,
}

impl Default for QuerySection {
    fn default() -> Self {
        Self { default_top: 5 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSection {
    /// Length of the "recent" window in days.
    pub default_days: u32,
}

impl Default for WindowSection {
    fn default() -> Self {
        Self { default_days: 7 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSection {
    pub default_format: ExportFormat,
    pub dot_graph_name: String,
    pub dot_node_style: String,
    pub mermaid_direction: String,
}

impl Default for ExportSection {
    fn default() -> Self {
        Self {
            default_format: ExportFormat::Mermaid,
            dot_graph_name: "EmployeeConnections".to_string(),
            dot_node_style: "shape=circle, style=filled, fillcolor=lightyellow".to_string(),
            mermaid_direction: "TD".to_string(),
        }
    }
}

impl CollabConfig {
    /// Read and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Parse and validate TOML text. Missing sections and keys take defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.export.dot_graph_name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "export.dot_graph_name must not be empty".to_string(),
            ));
        }
        if !MERMAID_DIRECTIONS.contains(&self.export.mermaid_direction.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "export.mermaid_direction must be one of {}, got {:?}",
                MERMAID_DIRECTIONS.join(", "),
                self.export.mermaid_direction
            )));
        }
        Ok(())
    }
}
