//! # Blueprint Index
//!
//! Builds `index.md` from the Markdown files already present in the output tree.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use std::fmt::Write;

use crate::error::{ExportError, Result};
use crate::output::collect_files;

/// File name of the generated index
pub const INDEX_FILE: &str = "index.md";

/// One documented Blueprint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// Path relative to the output root, `/`-separated
    pub relative_path: String,
    /// First directory of the relative path, if the file is not at the root
    pub category: Option<String>,
    /// File name without the `.md` extension
    pub name: String,
}

impl IndexEntry {
    pub fn new(relative_path: impl Into<String>) -> Self {
        let relative_path = relative_path.into();
        let parts: Vec<&str> = relative_path.split('/').collect();
        let category = (parts.len() > 1).then(|| parts[0].to_string());
        let file_name = parts.last().copied().unwrap_or_default();
        let name = file_name
            .strip_suffix(".md")
            .unwrap_or(file_name)
            .to_string();

        Self {
            relative_path,
            category,
            name,
        }
    }
}

/// Sorted listing of documented Blueprints
#[derive(Debug, Clone, Default)]
pub struct BlueprintIndex {
    entries: Vec<IndexEntry>,
}

impl BlueprintIndex {
    /// Build from relative paths; entries are ordered by full relative path
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut entries: Vec<IndexEntry> = paths.into_iter().map(IndexEntry::new).collect();
        entries.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        Self { entries }
    }

    /// Collect every `*.md` below `root` except index files
    pub fn scan(root: &Path) -> Result<Self> {
        let mut paths = Vec::new();
        for path in collect_files(root, "md", INDEX_FILE)? {
            if let Ok(relative) = path.strip_prefix(root) {
                let parts: Vec<String> = relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect();
                paths.push(parts.join("/"));
            }
        }

        Ok(Self::from_paths(paths))
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the index document.
    ///
    /// A category heading is written whenever the category differs from the
    /// last heading written, following the path order.
    pub fn render(&self, generated_at: &str) -> String {
        let mut md = String::new();
        let _ = write!(
            md,
            "# Blueprint Index\n\n\
             **Total Blueprints:** {}\n\
             **Last Updated:** {}\n\n\
             ## All Blueprints\n\n",
            self.entries.len(),
            generated_at
        );

        let mut current_category: Option<&str> = None;
        for entry in &self.entries {
            if let Some(category) = entry.category.as_deref() {
                if current_category != Some(category) {
                    current_category = Some(category);
                    let _ = write!(md, "\n### {}\n\n", category);
                }
            }
            let _ = writeln!(md, "- [{}]({})", entry.name, entry.relative_path);
        }

        md
    }
}

/// Result of writing the index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSummary {
    pub path: PathBuf,
    pub entries: usize,
}

/// Scan `root` and write `root/index.md`
pub fn write_index(root: &Path) -> Result<IndexSummary> {
    fs::create_dir_all(root).map_err(|e| ExportError::io(root, e))?;

    let index = BlueprintIndex::scan(root)?;
    let content = index.render(&Local::now().to_rfc3339());

    let path = root.join(INDEX_FILE);
    fs::write(&path, content).map_err(|e| ExportError::io(&path, e))?;

    tracing::info!("[BPDOC] Generated index: {}", path.display());
    Ok(IndexSummary {
        path,
        entries: index.len(),
    })
}
