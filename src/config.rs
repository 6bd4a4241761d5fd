//! # Export Configuration
//!
//! Static options for an export run. Values are resolved once with Figment
//! (built-in defaults, then an optional TOML file, then `BPDOC_*` environment
//! variables) and passed by reference into the acquirer, renderer and exporter.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ExportError, Result};

/// Default output directory, relative to the project root
pub const DEFAULT_OUTPUT_DIR: &str = "Docs/Blueprints";

/// Asset path prefix stripped before mapping into the output tree
pub const DEFAULT_CONTENT_ROOT: &str = "/Game/";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    /// Write Markdown next to every JSON export
    pub generate_markdown: bool,
    /// Ask the rich extractor for graph/node data
    pub include_graph_nodes: bool,
    /// Seconds between refreshes. Reserved; no watcher consumes it.
    pub refresh_interval: f64,
    pub content_root: String,
    /// Dependencies listed before the "N more" note
    pub dependency_limit: usize,
    /// Steps traced per execution chain before the "continues" marker
    pub chain_step_limit: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            generate_markdown: true,
            include_graph_nodes: true,
            refresh_interval: 5.0,
            content_root: DEFAULT_CONTENT_ROOT.to_string(),
            dependency_limit: 10,
            chain_step_limit: 50,
        }
    }
}

impl ExportConfig {
    /// Resolve defaults, then `file` (if it exists), then `BPDOC_*` env vars
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        if let Some(path) = file {
            if path.exists() {
                tracing::debug!("[BPDOC] Loading config from: {}", path.display());
                figment = figment.merge(Toml::file(path));
            } else {
                tracing::warn!("[BPDOC] Config file not found: {}", path.display());
            }
        }

        figment = figment.merge(Env::prefixed("BPDOC_"));

        let config: Self = figment
            .extract()
            .map_err(|e| ExportError::Config(e.to_string()))?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.chain_step_limit == 0 {
            return Err(ExportError::Config(
                "chain_step_limit must be at least 1".to_string(),
            ));
        }
        if !self.refresh_interval.is_finite() || self.refresh_interval < 0.0 {
            return Err(ExportError::Config(format!(
                "refresh_interval must be a non-negative number, got {}",
                self.refresh_interval
            )));
        }
        Ok(())
    }
}
