//! # Output Paths
//!
//! Maps Blueprint asset paths onto the documentation tree:
//! `/Game/Characters/BP_Player` -> `<out>/Characters/BP_Player.json`.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{ExportError, Result};

/// Lays out export files under an output root
#[derive(Debug, Clone)]
pub struct OutputLayout {
    root: PathBuf,
    content_root: String,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>, content_root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            content_root: content_root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Output file for `asset_path` with `extension` (including the dot).
    /// Does not touch the file system.
    pub fn file_for(&self, asset_path: &str, extension: &str) -> Result<PathBuf> {
        let segments = self.relative_segments(asset_path)?;
        let (name, dirs) = segments
            .split_last()
            .ok_or_else(|| ExportError::InvalidAssetPath(asset_path.to_string()))?;

        let mut path = self.root.clone();
        path.extend(dirs);
        path.push(format!("{}{}", name, extension));
        Ok(path)
    }

    /// Like [`file_for`](Self::file_for), creating the parent directories
    pub fn prepare_file(&self, asset_path: &str, extension: &str) -> Result<PathBuf> {
        let path = self.file_for(asset_path, extension)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ExportError::io(parent, e))?;
        }
        Ok(path)
    }

    /// Split an asset path below the content root into validated segments.
    /// The object suffix of the last segment (`BP_Player.BP_Player`) is dropped.
    fn relative_segments<'p>(&self, asset_path: &'p str) -> Result<Vec<&'p str>> {
        let relative = asset_path
            .strip_prefix(self.content_root.as_str())
            .unwrap_or(asset_path)
            .trim_start_matches('/');

        let mut segments: Vec<&str> = relative.split('/').collect();
        if let Some(last) = segments.last_mut() {
            if let Some((package, _object)) = last.split_once('.') {
                *last = package;
            }
        }

        if segments
            .iter()
            .any(|segment| segment.is_empty() || *segment == "." || *segment == "..")
        {
            return Err(ExportError::InvalidAssetPath(asset_path.to_string()));
        }

        Ok(segments)
    }
}

/// Files below `root` with `extension`, excluding any named `skip_name`, sorted by path
pub fn collect_files(root: &Path, extension: &str, skip_name: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            ExportError::io(path, e.into())
        })?;
        let path = entry.path();
        if entry.file_type().is_file()
            && path.extension().is_some_and(|ext| ext == extension)
            && path.file_name().is_some_and(|name| name != skip_name)
        {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn layout() -> OutputLayout {
        OutputLayout::new("docs", "/Game/")
    }

    #[test]
    fn test_maps_category_directories() {
        let path = layout()
            .file_for("/Game/Characters/Player/BP_Player", ".json")
            .unwrap();
        assert_eq!(
            path,
            PathBuf::from("docs/Characters/Player/BP_Player.json")
        );
    }

    #[test]
    fn test_drops_object_suffix() {
        let path = layout()
            .file_for("/Game/Props/BP_Door.BP_Door", ".md")
            .unwrap();
        assert_eq!(path, PathBuf::from("docs/Props/BP_Door.md"));
    }

    #[test]
    fn test_asset_at_content_root() {
        let path = layout().file_for("/Game/BP_GameMode", ".json").unwrap();
        assert_eq!(path, PathBuf::from("docs/BP_GameMode.json"));
    }

    #[test]
    fn test_foreign_root_is_kept_as_category() {
        let path = layout()
            .file_for("/MyPlugin/Widgets/BP_Hud", ".json")
            .unwrap();
        assert_eq!(path, PathBuf::from("docs/MyPlugin/Widgets/BP_Hud.json"));
    }

    #[test]
    fn test_rejects_traversal_and_empty_segments() {
        for bad in ["/Game/../etc/passwd", "/Game/A//B", "/Game/", ""] {
            assert!(
                matches!(
                    layout().file_for(bad, ".json"),
                    Err(ExportError::InvalidAssetPath(_))
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_prepare_file_creates_parents() {
        let dir = TempDir::new().unwrap();
        let layout = OutputLayout::new(dir.path(), "/Game/");

        let path = layout
            .prepare_file("/Game/Characters/BP_Player", ".json")
            .unwrap();

        assert!(path.parent().unwrap().is_dir());
        assert!(!path.exists());
    }
}
