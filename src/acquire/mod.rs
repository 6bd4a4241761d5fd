//! # Record Acquisition
//!
//! Obtains a [`BlueprintRecord`] for one asset. The rich strategy asks an external
//! [`GraphExtractor`] for a JSON document that includes graph nodes; when the
//! extractor is missing or fails, the reduced strategy reads what the basic
//! [`BlueprintAsset`] reflection surface exposes. Acquisition never fails: it
//! degrades.

mod dump;

pub use dump::{DumpDirectory, DumpExtractor, DumpedAsset};

use crate::config::ExportConfig;
use crate::error::{ExportError, Result};
use crate::record::{BlueprintRecord, Component, REFLECTED_COMPONENT_TYPE};
use serde_json::Value;

// ─────────────────────────────────────────────────────────────────────────────
// Collaborator Seams
// ─────────────────────────────────────────────────────────────────────────────

/// Basic reflection surface of a Blueprint asset
///
/// Optional queries return `None` when the asset does not expose them; that is
/// never an error.
pub trait BlueprintAsset {
    fn name(&self) -> String;

    /// Fully-qualified asset path
    fn path_name(&self) -> String;

    fn parent_class(&self) -> Option<String> {
        None
    }

    fn generated_class(&self) -> Option<String> {
        None
    }

    /// Components attached to the generated class's default object, or `None`
    /// when the default object has no "components by class" query
    fn default_object_components(&self) -> Option<Vec<ReflectedComponent>> {
        None
    }

    fn description(&self) -> Option<String> {
        None
    }

    fn implemented_interfaces(&self) -> Vec<String> {
        Vec::new()
    }
}

/// A component seen through the reflection surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflectedComponent {
    pub name: String,
    pub class_name: String,
}

/// Rich extraction capability producing the full record as JSON text.
///
/// Implementations report "not installed" with [`ExportError::MissingCapability`].
pub trait GraphExtractor {
    fn extract_blueprint_data(&self, asset: &dyn BlueprintAsset) -> Result<String>;
}

/// Yields every Blueprint asset known to the host
pub trait AssetRegistry {
    fn blueprints(&self) -> Vec<&dyn BlueprintAsset>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Acquisition
// ─────────────────────────────────────────────────────────────────────────────

/// Outcome of asking the rich extractor, resolved once per asset
#[derive(Debug)]
pub enum RichExtraction {
    Extracted(BlueprintRecord),
    /// No extractor is installed
    Unavailable,
    /// The extractor ran but raised an error or returned unusable JSON
    Failed(ExportError),
}

/// Which strategy produced a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordSource {
    Rich,
    Reduced,
}

#[derive(Debug)]
pub struct Acquisition {
    pub record: BlueprintRecord,
    pub source: RecordSource,
}

/// Chooses between rich and reduced extraction for each asset
pub struct RecordAcquirer<'a> {
    include_graph_nodes: bool,
    extractor: Option<&'a dyn GraphExtractor>,
}

impl<'a> RecordAcquirer<'a> {
    pub fn new(config: &ExportConfig, extractor: Option<&'a dyn GraphExtractor>) -> Self {
        Self {
            include_graph_nodes: config.include_graph_nodes,
            extractor,
        }
    }

    /// Acquire the record for `asset`, falling back to the reduced strategy
    pub fn acquire(&self, asset: &dyn BlueprintAsset) -> Acquisition {
        let (mut record, source) = if self.include_graph_nodes {
            match self.try_rich(asset) {
                RichExtraction::Extracted(record) => (record, RecordSource::Rich),
                RichExtraction::Unavailable => {
                    tracing::warn!(
                        "[BPDOC] Graph extractor not found for {}, falling back to metadata-only export",
                        asset.name()
                    );
                    (reflect_record(asset), RecordSource::Reduced)
                }
                RichExtraction::Failed(e) => {
                    tracing::error!(
                        "[BPDOC] Error extracting blueprint data for {}: {}",
                        asset.name(),
                        e
                    );
                    (reflect_record(asset), RecordSource::Reduced)
                }
            }
        } else {
            (reflect_record(asset), RecordSource::Reduced)
        };

        record.stamp_exported_at();

        Acquisition { record, source }
    }

    /// Ask the rich extractor for a record
    pub fn try_rich(&self, asset: &dyn BlueprintAsset) -> RichExtraction {
        let Some(extractor) = self.extractor else {
            return RichExtraction::Unavailable;
        };

        let parsed = extractor
            .extract_blueprint_data(asset)
            .and_then(|json| serde_json::from_str::<BlueprintRecord>(&json).map_err(ExportError::from));

        match parsed {
            Ok(record) => RichExtraction::Extracted(record),
            Err(ExportError::MissingCapability) => RichExtraction::Unavailable,
            Err(e) => RichExtraction::Failed(e),
        }
    }
}

/// Build the reduced record from the reflection surface alone
pub fn reflect_record(asset: &dyn BlueprintAsset) -> BlueprintRecord {
    let mut record = BlueprintRecord::new(asset.name(), asset.path_name());
    record.parent_class = asset.parent_class();

    if let Some(generated_class) = asset.generated_class() {
        record.generated_class = Some(generated_class);
        if let Some(components) = asset.default_object_components() {
            record.components = components
                .into_iter()
                .map(|component| Component {
                    name: component.name,
                    class_name: component.class_name,
                    component_type: Some(REFLECTED_COMPONENT_TYPE.to_string()),
                })
                .collect();
        }
    }

    if let Some(description) = asset.description() {
        record
            .metadata
            .insert("description".to_string(), Value::String(description));
    }
    record.interfaces = asset.implemented_interfaces();

    record
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeAsset {
        generated: bool,
    }

    impl BlueprintAsset for FakeAsset {
        fn name(&self) -> String {
            "BP_Player".to_string()
        }

        fn path_name(&self) -> String {
            "/Game/Characters/BP_Player.BP_Player".to_string()
        }

        fn parent_class(&self) -> Option<String> {
            Some("Character".to_string())
        }

        fn generated_class(&self) -> Option<String> {
            self.generated.then(|| "BP_Player_C".to_string())
        }

        fn default_object_components(&self) -> Option<Vec<ReflectedComponent>> {
            Some(vec![ReflectedComponent {
                name: "CollisionCylinder".to_string(),
                class_name: "CapsuleComponent".to_string(),
            }])
        }

        fn implemented_interfaces(&self) -> Vec<String> {
            vec!["BPI_Interactable".to_string()]
        }
    }

    enum FakeExtractor {
        Json(&'static str),
        NotInstalled,
        Broken,
    }

    impl GraphExtractor for FakeExtractor {
        fn extract_blueprint_data(&self, _asset: &dyn BlueprintAsset) -> Result<String> {
            match self {
                Self::Json(json) => Ok(json.to_string()),
                Self::NotInstalled => Err(ExportError::MissingCapability),
                Self::Broken => Err(ExportError::Extraction("graph was not loaded".to_string())),
            }
        }
    }

    const RICH_JSON: &str = r#"{
        "name": "BP_Player",
        "path": "/Game/Characters/BP_Player.BP_Player",
        "class_type": "Blueprint",
        "parent_class": "Character",
        "graphs": [{"name": "EventGraph", "nodes": []}]
    }"#;

    #[test]
    fn test_rich_extraction() {
        let extractor = FakeExtractor::Json(RICH_JSON);
        let acquirer = RecordAcquirer::new(&ExportConfig::default(), Some(&extractor));

        let acquisition = acquirer.acquire(&FakeAsset { generated: true });

        assert_eq!(acquisition.source, RecordSource::Rich);
        assert_eq!(acquisition.record.graphs().len(), 1);
        assert!(acquisition.record.components.is_empty());
        assert!(acquisition.record.exported_at.is_some());
    }

    #[test]
    fn test_missing_extractor_falls_back() {
        let acquirer = RecordAcquirer::new(&ExportConfig::default(), None);
        assert!(matches!(
            acquirer.try_rich(&FakeAsset { generated: true }),
            RichExtraction::Unavailable
        ));

        let acquisition = acquirer.acquire(&FakeAsset { generated: true });
        assert_eq!(acquisition.source, RecordSource::Reduced);
        assert!(acquisition.record.graphs.is_none());
    }

    #[test]
    fn test_not_installed_error_is_unavailable() {
        let extractor = FakeExtractor::NotInstalled;
        let acquirer = RecordAcquirer::new(&ExportConfig::default(), Some(&extractor));

        assert!(matches!(
            acquirer.try_rich(&FakeAsset { generated: true }),
            RichExtraction::Unavailable
        ));
    }

    #[test]
    fn test_failing_or_garbled_extractor_falls_back() {
        for extractor in [FakeExtractor::Broken, FakeExtractor::Json("{not json")] {
            let acquirer = RecordAcquirer::new(&ExportConfig::default(), Some(&extractor));

            assert!(matches!(
                acquirer.try_rich(&FakeAsset { generated: true }),
                RichExtraction::Failed(_)
            ));
            let acquisition = acquirer.acquire(&FakeAsset { generated: true });
            assert_eq!(acquisition.source, RecordSource::Reduced);
            assert_eq!(acquisition.record.name, "BP_Player");
        }
    }

    #[test]
    fn test_graph_nodes_disabled_skips_extractor() {
        let extractor = FakeExtractor::Json(RICH_JSON);
        let config = ExportConfig {
            include_graph_nodes: false,
            ..Default::default()
        };
        let acquirer = RecordAcquirer::new(&config, Some(&extractor));

        let acquisition = acquirer.acquire(&FakeAsset { generated: true });

        assert_eq!(acquisition.source, RecordSource::Reduced);
    }

    #[test]
    fn test_reduced_record_fields() {
        let record = reflect_record(&FakeAsset { generated: true });

        assert_eq!(record.parent_class.as_deref(), Some("Character"));
        assert_eq!(record.generated_class.as_deref(), Some("BP_Player_C"));
        assert_eq!(record.components.len(), 1);
        assert_eq!(
            record.components[0].component_type.as_deref(),
            Some("ActorComponent")
        );
        assert_eq!(record.interfaces, vec!["BPI_Interactable".to_string()]);
        assert!(record.metadata.is_empty());
    }

    #[test]
    fn test_components_need_generated_class() {
        let record = reflect_record(&FakeAsset { generated: false });

        assert!(record.generated_class.is_none());
        assert!(record.components.is_empty());
    }
}
