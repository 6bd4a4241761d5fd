//! # Blueprint Exporter
//!
//! Main entry points for exporting Blueprints to JSON and Markdown.

use crate::acquire::{AssetRegistry, BlueprintAsset, GraphExtractor, RecordAcquirer, RecordSource};
use crate::config::ExportConfig;
use crate::error::{ExportError, Result};
use crate::index::{write_index, IndexSummary};
use crate::output::OutputLayout;
use crate::record::BlueprintRecord;
use crate::render::{render_markdown, RenderOptions};
use std::fs;
use std::path::{Path, PathBuf};

/// Files written for one Blueprint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFiles {
    pub json: PathBuf,
    pub markdown: Option<PathBuf>,
    pub source: RecordSource,
}

/// A Blueprint that could not be exported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFailure {
    pub asset: String,
    pub error: String,
}

/// Outcome of a batch export
#[derive(Debug)]
pub struct ExportReport {
    /// Number of Blueprints written successfully
    pub exported: usize,
    pub failed: Vec<ExportFailure>,
    /// Index build result; a failure here does not undo the exports
    pub index: Result<IndexSummary>,
}

/// Exports Blueprints into the configured output directory
pub struct Exporter<'a> {
    config: &'a ExportConfig,
    layout: OutputLayout,
    acquirer: RecordAcquirer<'a>,
    options: RenderOptions,
}

impl<'a> Exporter<'a> {
    /// Create an exporter. `extractor` is the rich graph extractor, if installed.
    pub fn new(config: &'a ExportConfig, extractor: Option<&'a dyn GraphExtractor>) -> Self {
        Self {
            config,
            layout: OutputLayout::new(&config.output_dir, config.content_root.as_str()),
            acquirer: RecordAcquirer::new(config, extractor),
            options: RenderOptions::from(config),
        }
    }

    pub fn output_dir(&self) -> &Path {
        self.layout.root()
    }

    /// Export a single Blueprint to JSON and, if enabled, Markdown
    ///
    /// Both documents are generated from the same in-memory record.
    pub fn export_blueprint(&self, asset: &dyn BlueprintAsset) -> Result<ExportedFiles> {
        let acquisition = self.acquirer.acquire(asset);
        let record = &acquisition.record;

        let json_path = self.layout.prepare_file(&asset.path_name(), ".json")?;
        write_json(&json_path, record)?;
        tracing::info!("[BPDOC] Exported JSON: {}", json_path.display());

        let markdown = if self.config.generate_markdown {
            let md_path = self.layout.prepare_file(&asset.path_name(), ".md")?;
            let content = render_markdown(record, &self.options);
            fs::write(&md_path, content).map_err(|e| ExportError::io(&md_path, e))?;
            tracing::info!("[BPDOC] Exported Markdown: {}", md_path.display());
            Some(md_path)
        } else {
            None
        };

        Ok(ExportedFiles {
            json: json_path,
            markdown,
            source: acquisition.source,
        })
    }

    /// Export every Blueprint the registry yields, then rebuild the index
    ///
    /// Never fails as a whole: per-asset errors are logged and collected in the
    /// report, and the index result is carried as data.
    pub fn export_all<R: AssetRegistry + ?Sized>(&self, registry: &R) -> ExportReport {
        tracing::info!("[BPDOC] Starting blueprint export...");

        let mut exported = 0;
        let mut failed = Vec::new();

        for asset in registry.blueprints() {
            match self.export_blueprint(asset) {
                Ok(_) => exported += 1,
                Err(e) => {
                    tracing::error!("[BPDOC] Failed to export blueprint {}: {}", asset.name(), e);
                    failed.push(ExportFailure {
                        asset: asset.name(),
                        error: e.to_string(),
                    });
                }
            }
        }

        let index = write_index(self.layout.root());
        if let Err(e) = &index {
            tracing::error!("[BPDOC] Failed to build index: {}", e);
        }

        tracing::info!(
            "[BPDOC] Export complete! Exported {} blueprints to {}",
            exported,
            self.layout.root().display()
        );

        ExportReport {
            exported,
            failed,
            index,
        }
    }
}

/// Write `record` as pretty-printed UTF-8 JSON
pub fn write_json(path: &Path, record: &BlueprintRecord) -> Result<()> {
    let json = serde_json::to_string_pretty(record)?;
    fs::write(path, json).map_err(|e| ExportError::io(path, e))
}
