//! # Plugin Dump Source
//!
//! Reads the JSON files the native exporter plugin writes with its
//! "export all blueprints to directory" entry point, so the export pipeline can
//! run outside the editor. Each dump acts as an asset (reflection fields come
//! from the parsed JSON) and [`DumpExtractor`] serves the raw text as the rich
//! extraction result.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::{AssetRegistry, BlueprintAsset, GraphExtractor, ReflectedComponent};
use crate::error::{ExportError, Result};
use crate::output::collect_files;

/// One dumped Blueprint
#[derive(Debug, Clone)]
pub struct DumpedAsset {
    file: PathBuf,
    raw: String,
    /// `Value::Null` when the dump is not valid JSON
    value: Value,
}

impl DumpedAsset {
    pub fn new(file: impl Into<PathBuf>, raw: String) -> Self {
        let value = serde_json::from_str(&raw).unwrap_or(Value::Null);
        Self {
            file: file.into(),
            raw,
            value,
        }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    fn file_stem(&self) -> String {
        self.file
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    fn string_field(&self, key: &str) -> Option<String> {
        self.value
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}

impl BlueprintAsset for DumpedAsset {
    fn name(&self) -> String {
        self.string_field("name").unwrap_or_else(|| self.file_stem())
    }

    fn path_name(&self) -> String {
        self.string_field("path").unwrap_or_else(|| self.file_stem())
    }

    fn parent_class(&self) -> Option<String> {
        self.string_field("parent_class")
    }

    fn generated_class(&self) -> Option<String> {
        self.string_field("generated_class")
    }

    fn default_object_components(&self) -> Option<Vec<ReflectedComponent>> {
        let components = self.value.get("components")?.as_array()?;
        Some(
            components
                .iter()
                .map(|component| ReflectedComponent {
                    name: json_str(component, "name"),
                    class_name: json_str(component, "class"),
                })
                .collect(),
        )
    }

    fn description(&self) -> Option<String> {
        self.value
            .pointer("/metadata/description")
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    fn implemented_interfaces(&self) -> Vec<String> {
        self.value
            .get("interfaces")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn json_str(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// A directory of plugin dumps, ordered by file path
#[derive(Debug, Default)]
pub struct DumpDirectory {
    assets: Vec<DumpedAsset>,
}

impl DumpDirectory {
    /// Collect every `*.json` dump below `dir`. Unreadable files are skipped.
    pub fn open(dir: &Path) -> Result<Self> {
        let files = collect_files(dir, "json", "index.json")?;

        let mut assets = Vec::with_capacity(files.len());
        for file in files {
            match fs::read_to_string(&file) {
                Ok(raw) => assets.push(DumpedAsset::new(file, raw)),
                Err(e) => {
                    tracing::warn!("[BPDOC] Skipping unreadable dump {}: {}", file.display(), e);
                }
            }
        }

        tracing::info!("[BPDOC] Found {} blueprint dumps in {}", assets.len(), dir.display());
        Ok(Self { assets })
    }

    pub fn from_assets(assets: Vec<DumpedAsset>) -> Self {
        Self { assets }
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Rich extractor serving the raw dump text, keyed by asset path.
    /// When two dumps share a path the first one in file order is served.
    pub fn extractor(&self) -> DumpExtractor<'_> {
        let mut dumps: HashMap<String, &str> = HashMap::with_capacity(self.assets.len());
        for asset in &self.assets {
            match dumps.entry(asset.path_name()) {
                Entry::Occupied(entry) => {
                    tracing::warn!(
                        "[BPDOC] Duplicate dump for {} in {}, keeping the earlier file",
                        entry.key(),
                        asset.file().display()
                    );
                }
                Entry::Vacant(entry) => {
                    entry.insert(asset.raw.as_str());
                }
            }
        }
        DumpExtractor { dumps }
    }
}

impl AssetRegistry for DumpDirectory {
    fn blueprints(&self) -> Vec<&dyn BlueprintAsset> {
        self.assets
            .iter()
            .map(|asset| asset as &dyn BlueprintAsset)
            .collect()
    }
}

/// Rich extractor backed by dump files
pub struct DumpExtractor<'a> {
    dumps: HashMap<String, &'a str>,
}

impl GraphExtractor for DumpExtractor<'_> {
    fn extract_blueprint_data(&self, asset: &dyn BlueprintAsset) -> Result<String> {
        let path = asset.path_name();
        self.dumps
            .get(&path)
            .map(|raw| raw.to_string())
            .ok_or_else(|| ExportError::Extraction(format!("no dump found for {}", path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acquire::{RecordAcquirer, RecordSource};
    use crate::config::ExportConfig;
    use tempfile::TempDir;

    const DOOR: &str = r#"{
        "name": "BP_Door",
        "path": "/Game/Props/BP_Door.BP_Door",
        "class_type": "Blueprint",
        "parent_class": "Actor",
        "generated_class": "BP_Door_C",
        "components": [{"name": "Frame", "class": "StaticMeshComponent"}],
        "graphs": [{"name": "EventGraph", "nodes": []}],
        "variables": [],
        "functions": [],
        "dependencies": []
    }"#;

    #[test]
    fn test_reflection_fields_come_from_json() {
        let asset = DumpedAsset::new("dumps/BP_Door.json", DOOR.to_string());

        assert_eq!(asset.name(), "BP_Door");
        assert_eq!(asset.path_name(), "/Game/Props/BP_Door.BP_Door");
        assert_eq!(asset.parent_class().as_deref(), Some("Actor"));
        assert_eq!(
            asset.default_object_components(),
            Some(vec![ReflectedComponent {
                name: "Frame".to_string(),
                class_name: "StaticMeshComponent".to_string(),
            }])
        );
        assert!(asset.implemented_interfaces().is_empty());
    }

    #[test]
    fn test_garbled_dump_falls_back_to_file_name() {
        let asset = DumpedAsset::new("dumps/BP_Broken.json", "{\"name\": ".to_string());

        assert_eq!(asset.name(), "BP_Broken");
        assert_eq!(asset.path_name(), "BP_Broken");
        assert!(asset.default_object_components().is_none());
    }

    #[test]
    fn test_open_collects_sorted_json_dumps() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("BP_Door.json"), DOOR).unwrap();
        fs::write(dir.path().join("BP_Altar.json"), "{\"name\": \"BP_Altar\"}").unwrap();
        fs::write(dir.path().join("index.json"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let directory = DumpDirectory::open(dir.path()).unwrap();

        let names: Vec<String> = directory.blueprints().iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["BP_Altar".to_string(), "BP_Door".to_string()]);
    }

    #[test]
    fn test_duplicate_paths_serve_the_first_dump() {
        let renamed = DOOR.replace("\"Actor\"", "\"Pawn\"");
        let directory = DumpDirectory::from_assets(vec![
            DumpedAsset::new("a/BP_Door.json", DOOR.to_string()),
            DumpedAsset::new("b/BP_Door.json", renamed),
        ]);
        let extractor = directory.extractor();

        for asset in directory.blueprints() {
            let raw = extractor.extract_blueprint_data(asset).unwrap();
            assert_eq!(raw, DOOR);
        }
    }

    #[test]
    fn test_dump_extractor_yields_rich_records() {
        let directory =
            DumpDirectory::from_assets(vec![DumpedAsset::new("BP_Door.json", DOOR.to_string())]);
        let extractor = directory.extractor();
        let acquirer = RecordAcquirer::new(&ExportConfig::default(), Some(&extractor));

        let assets = directory.blueprints();
        let acquisition = acquirer.acquire(assets[0]);

        assert_eq!(acquisition.source, RecordSource::Rich);
        assert_eq!(acquisition.record.generated_class.as_deref(), Some("BP_Door_C"));
        assert_eq!(acquisition.record.graphs().len(), 1);
    }
}
