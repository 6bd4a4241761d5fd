//! # Markdown Regeneration
//!
//! Re-renders Markdown for JSON exports that already sit in the output tree,
//! without going back to the editor.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ExportError, Result};
use crate::output::collect_files;
use crate::record::BlueprintRecord;
use crate::render::{render_markdown, RenderOptions};

#[derive(Debug, Default)]
pub struct RegenerateReport {
    pub rendered: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

/// Render a sibling `.md` for every `*.json` export below `root`
pub fn regenerate_markdown(root: &Path, options: &RenderOptions) -> Result<RegenerateReport> {
    let json_files = collect_files(root, "json", "index.json")?;

    tracing::info!("[BPDOC] Found {} JSON files", json_files.len());

    let mut report = RegenerateReport::default();
    for json_path in json_files {
        match render_file(&json_path, options) {
            Ok(md_path) => {
                tracing::debug!("[BPDOC] Created: {}", md_path.display());
                report.rendered.push(md_path);
            }
            Err(e) => {
                tracing::error!("[BPDOC] Failed: {} - {}", json_path.display(), e);
                report.failed.push((json_path, e.to_string()));
            }
        }
    }

    tracing::info!(
        "[BPDOC] Created {} markdown files ({} failed)",
        report.rendered.len(),
        report.failed.len()
    );
    Ok(report)
}

fn render_file(json_path: &Path, options: &RenderOptions) -> Result<PathBuf> {
    let json = fs::read_to_string(json_path).map_err(|e| ExportError::io(json_path, e))?;
    let mut record: BlueprintRecord = serde_json::from_str(&json)?;
    // Plugin dumps carry no timestamp
    record.stamp_exported_at();

    let md_path = json_path.with_extension("md");
    fs::write(&md_path, render_markdown(&record, options))
        .map_err(|e| ExportError::io(&md_path, e))?;
    Ok(md_path)
}
