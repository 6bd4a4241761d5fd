//! # Blueprint Records
//!
//! Explicit data model for an extracted Blueprint. Records are produced once per
//! export (either parsed from the rich extractor's JSON or assembled from the
//! reflection surface) and then only read.
//!
//! Every optional field documents what an absent value means. Fields that the
//! renderer shows as a placeholder stay `Option` so that the JSON output keeps
//! the distinction between "absent" and "empty".

use chrono::{Local, SecondsFormat};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Pin type tag that marks control-flow pins
pub const EXEC_PIN_TYPE: &str = "exec";

/// Type tag given to components found through the reflection surface
pub const REFLECTED_COMPONENT_TYPE: &str = "ActorComponent";

fn default_class_type() -> String {
    "Blueprint".to_string()
}

fn default_graph_name() -> String {
    "Unknown".to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// Blueprint
// ─────────────────────────────────────────────────────────────────────────────

/// Metadata record for a single Blueprint asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlueprintRecord {
    pub name: String,
    /// Fully-qualified asset path, e.g. `/Game/Characters/BP_Player.BP_Player`
    #[serde(default)]
    pub path: String,
    /// Defaults to `"Blueprint"`
    #[serde(default = "default_class_type")]
    pub class_type: String,
    /// Export timestamp; stamped during acquisition when the extractor omits it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<String>,
    #[serde(default)]
    pub parent_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_class: Option<String>,
    #[serde(default)]
    pub variables: Vec<Variable>,
    #[serde(default)]
    pub functions: Vec<Function>,
    #[serde(default)]
    pub components: Vec<Component>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    /// Asset paths referenced from the event graphs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    /// Free-form metadata; only `description` is interpreted
    #[serde(default)]
    pub metadata: Map<String, Value>,
    /// Graph data, present only when the rich extractor produced the record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graphs: Option<Vec<Graph>>,
}

impl BlueprintRecord {
    /// Create an empty record with the default class type
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            class_type: default_class_type(),
            exported_at: None,
            parent_class: None,
            generated_class: None,
            variables: Vec::new(),
            functions: Vec::new(),
            components: Vec::new(),
            interfaces: Vec::new(),
            dependencies: Vec::new(),
            metadata: Map::new(),
            graphs: None,
        }
    }

    /// `metadata.description`, when it is a non-empty string
    pub fn description(&self) -> Option<&str> {
        self.metadata
            .get("description")
            .and_then(Value::as_str)
            .filter(|d| !d.is_empty())
    }

    /// Graphs, treating an absent list as empty
    pub fn graphs(&self) -> &[Graph] {
        self.graphs.as_deref().unwrap_or_default()
    }

    /// Set `exported_at` to the current local time unless it is already present
    pub fn stamp_exported_at(&mut self) {
        if self.exported_at.is_none() {
            self.exported_at = Some(Local::now().to_rfc3339_opts(SecondsFormat::Secs, false));
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Members
// ─────────────────────────────────────────────────────────────────────────────

/// Component attached to the Blueprint's construction script or default object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "class")]
    pub class_name: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub component_type: Option<String>,
}

/// Member variable; every field is best-effort and renders as a placeholder when absent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub var_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_exposed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The function's own graph. It is also listed under the record's graphs,
    /// so the renderer does not show it a second time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph: Option<Graph>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub param_type: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Graphs
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default = "default_graph_name")]
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<Node>,
}

impl Graph {
    /// Look up a node by id
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }
}

/// A node in a Blueprint graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique within the owning graph
    #[serde(default)]
    pub id: String,
    /// Display title; may contain embedded line breaks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Coarse type tag, e.g. `Event`, `CallFunction`, `VariableGet`
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub pins: Vec<Pin>,
    /// Ids of nodes linked from this node's output pins
    #[serde(default)]
    pub connections: Vec<String>,
}

impl Node {
    /// Type tag, or `""` when absent
    pub fn type_tag(&self) -> &str {
        self.node_type.as_deref().unwrap_or_default()
    }

    /// Non-exec input pins in declaration order
    pub fn data_inputs(&self) -> impl Iterator<Item = &Pin> {
        self.pins
            .iter()
            .filter(|pin| pin.direction == PinDirection::Input && !pin.is_exec())
    }

    /// Non-exec output pins in declaration order
    pub fn data_outputs(&self) -> impl Iterator<Item = &Pin> {
        self.pins
            .iter()
            .filter(|pin| pin.direction == PinDirection::Output && !pin.is_exec())
    }
}

/// 2D editor position; absent coordinates default to zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

/// Direction of a pin on a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinDirection {
    Input,
    Output,
    #[default]
    #[serde(other)]
    Unknown,
}

impl PinDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Output => "output",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub direction: PinDirection,
    #[serde(default, rename = "type")]
    pub pin_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl Pin {
    /// Display name when present and non-empty, otherwise the raw name
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.name)
    }

    pub fn is_exec(&self) -> bool {
        self.pin_type == EXEC_PIN_TYPE
    }

    /// Default value, treating an empty string as absent
    pub fn default_text(&self) -> Option<&str> {
        self.default_value.as_deref().filter(|v| !v.is_empty())
    }
}
