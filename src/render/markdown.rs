//! # Blueprint Markdown Renderer
//!
//! Turns a [`BlueprintRecord`] into a human-readable document. Sections appear in
//! a fixed order and are left out entirely when their source data is empty.

use crate::record::{BlueprintRecord, Variable};
use std::fmt::Write;

use super::graph::GraphRenderer;
use super::{single_line, RenderOptions};

/// Placeholder for absent header fields
const NONE: &str = "None";

/// Placeholder for absent variable table cells
const NOT_AVAILABLE: &str = "N/A";

/// Render `record` to Markdown
///
/// # Examples
///
/// ```rust
/// use bpdoc::{render_markdown, BlueprintRecord, RenderOptions};
///
/// let record = BlueprintRecord::new("BP_Door", "/Game/Props/BP_Door.BP_Door");
/// let md = render_markdown(&record, &RenderOptions::default());
/// assert!(md.starts_with("# BP_Door\n"));
/// ```
pub fn render_markdown(record: &BlueprintRecord, options: &RenderOptions) -> String {
    MarkdownRenderer::new(record, options).render()
}

/// Markdown renderer for a single Blueprint record
pub struct MarkdownRenderer<'a> {
    record: &'a BlueprintRecord,
    options: &'a RenderOptions,
}

impl<'a> MarkdownRenderer<'a> {
    pub fn new(record: &'a BlueprintRecord, options: &'a RenderOptions) -> Self {
        Self { record, options }
    }

    /// Generate the complete document
    pub fn render(&self) -> String {
        let mut md = String::new();

        // Add header
        self.render_header(&mut md);
        self.render_description(&mut md);

        // Class members
        self.render_components(&mut md);
        self.render_variables(&mut md);
        self.render_functions(&mut md);
        self.render_interfaces(&mut md);

        // Node logic, only present on rich records
        self.render_graphs(&mut md);
        self.render_dependencies(&mut md);

        md
    }

    fn render_header(&self, md: &mut String) {
        let record = self.record;
        let _ = write!(
            md,
            "# {}\n\n\
             **Type:** {}\n\
             **Path:** `{}`\n\
             **Parent Class:** {}\n\
             **Generated Class:** {}\n\
             **Exported:** {}\n\n",
            single_line(&record.name),
            record.class_type,
            record.path,
            record.parent_class.as_deref().unwrap_or(NONE),
            record.generated_class.as_deref().unwrap_or(NONE),
            record.exported_at.as_deref().unwrap_or_default(),
        );
    }

    fn render_description(&self, md: &mut String) {
        if let Some(description) = self.record.description() {
            let _ = write!(md, "## Description\n\n{}\n\n", description);
        }
    }

    fn render_components(&self, md: &mut String) {
        if self.record.components.is_empty() {
            return;
        }

        md.push_str("## Components\n\n");
        for component in &self.record.components {
            let _ = writeln!(md, "- **{}** ({})", component.name, component.class_name);
        }
        md.push('\n');
    }

    fn render_variables(&self, md: &mut String) {
        if self.record.variables.is_empty() {
            return;
        }

        md.push_str("## Variables\n\n");
        md.push_str("| Name | Type | Category | Exposed | Default |\n");
        md.push_str("|------|------|----------|---------|---------|\n");
        for variable in &self.record.variables {
            let _ = writeln!(md, "{}", variable_row(variable));
        }
        md.push('\n');
    }

    fn render_functions(&self, md: &mut String) {
        if self.record.functions.is_empty() {
            return;
        }

        md.push_str("## Functions\n\n");
        for function in &self.record.functions {
            let params: Vec<String> = function
                .parameters
                .iter()
                .map(|p| format!("{}: {}", p.name, p.param_type))
                .collect();
            let _ = write!(md, "### {}({})\n\n", function.name, params.join(", "));

            if let Some(description) = function.description.as_deref().filter(|d| !d.is_empty()) {
                let _ = write!(md, "{}\n\n", description);
            }
        }
        md.push('\n');
    }

    fn render_interfaces(&self, md: &mut String) {
        if self.record.interfaces.is_empty() {
            return;
        }

        md.push_str("## Implemented Interfaces\n\n");
        for interface in &self.record.interfaces {
            let _ = writeln!(md, "- {}", interface);
        }
        md.push('\n');
    }

    fn render_graphs(&self, md: &mut String) {
        let graphs = self.record.graphs();
        if graphs.is_empty() {
            return;
        }

        md.push_str("## Graphs & Node Logic\n\n");
        for graph in graphs {
            let _ = write!(
                md,
                "### {}\n\n**Total Nodes:** {}\n\n",
                graph.name,
                graph.nodes.len()
            );

            // Empty graphs get the heading only
            if !graph.nodes.is_empty() {
                md.push_str(&GraphRenderer::new(graph, self.options.chain_step_limit).render());
            }
        }
        md.push('\n');
    }

    fn render_dependencies(&self, md: &mut String) {
        let dependencies = &self.record.dependencies;
        if dependencies.is_empty() {
            return;
        }

        md.push_str("## Dependencies\n\n");
        for dependency in dependencies.iter().take(self.options.dependency_limit) {
            let _ = writeln!(md, "- `{}`", dependency);
        }

        let hidden = dependencies.len().saturating_sub(self.options.dependency_limit);
        if hidden > 0 {
            let _ = writeln!(md, "\n_...and {} more_", hidden);
        }
        md.push('\n');
    }
}

fn variable_row(variable: &Variable) -> String {
    let exposed = variable.is_exposed.map(|e| e.to_string());
    let cells = [
        variable.name.as_deref(),
        variable.var_type.as_deref(),
        variable.category.as_deref(),
        exposed.as_deref(),
        variable.default_value.as_deref(),
    ];

    // Keep every cell on one line and inside its column
    let cells: Vec<String> = cells
        .iter()
        .map(|cell| match cell {
            Some(text) if !text.is_empty() => single_line(text).replace('|', "\\|"),
            _ => NOT_AVAILABLE.to_string(),
        })
        .collect();

    format!("| {} |", cells.join(" | "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Component, Function, Graph, Node, Parameter};
    use serde_json::Value;

    fn options() -> RenderOptions {
        RenderOptions {
            dependency_limit: 10,
            chain_step_limit: 50,
        }
    }

    fn bare_record() -> BlueprintRecord {
        let mut record = BlueprintRecord::new("BP_Player", "/Game/Characters/BP_Player.BP_Player");
        record.exported_at = Some("2026-10-16T09:30:00+02:00".to_string());
        record
    }

    #[test]
    fn test_empty_record_has_only_header() {
        let md = render_markdown(&bare_record(), &options());

        assert_eq!(
            md,
            "# BP_Player\n\n\
             **Type:** Blueprint\n\
             **Path:** `/Game/Characters/BP_Player.BP_Player`\n\
             **Parent Class:** None\n\
             **Generated Class:** None\n\
             **Exported:** 2026-10-16T09:30:00+02:00\n\n"
        );
        assert!(!md.contains("##"));
    }

    #[test]
    fn test_empty_graph_list_is_omitted() {
        let mut record = bare_record();
        record.graphs = Some(Vec::new());

        let md = render_markdown(&record, &options());

        assert!(!md.contains("## Graphs"));
    }

    #[test]
    fn test_sections_appear_in_fixed_order() {
        let mut record = bare_record();
        record.parent_class = Some("Character".to_string());
        record
            .metadata
            .insert("description".to_string(), Value::from("The player pawn."));
        record.components.push(Component {
            name: "CameraBoom".to_string(),
            class_name: "SpringArmComponent".to_string(),
            component_type: None,
        });
        record.variables.push(Variable {
            name: Some("Health".to_string()),
            var_type: Some("real".to_string()),
            ..Default::default()
        });
        record.functions.push(Function {
            name: "ApplyDamage".to_string(),
            parameters: vec![
                Parameter {
                    name: "Amount".to_string(),
                    param_type: "real".to_string(),
                },
                Parameter {
                    name: "Instigator".to_string(),
                    param_type: "object<Controller>".to_string(),
                },
            ],
            description: Some("Subtracts health.".to_string()),
            graph: None,
        });
        record.interfaces.push("BPI_Damageable".to_string());
        record.graphs = Some(vec![Graph {
            name: "EventGraph".to_string(),
            nodes: vec![Node {
                id: "K2Node_Event_0".to_string(),
                title: Some("Event BeginPlay".to_string()),
                node_type: Some("Event".to_string()),
                ..Default::default()
            }],
        }]);
        record.dependencies.push("/Script/Engine.GameplayStatics".to_string());

        let md = render_markdown(&record, &options());

        assert!(md.contains("**Parent Class:** Character\n"));
        assert!(md.contains("## Description\n\nThe player pawn.\n\n"));
        assert!(md.contains("- **CameraBoom** (SpringArmComponent)\n"));
        assert!(md.contains("| Health | real | N/A | N/A | N/A |\n"));
        assert!(md.contains(
            "### ApplyDamage(Amount: real, Instigator: object<Controller>)\n\nSubtracts health.\n\n"
        ));
        assert!(md.contains("## Implemented Interfaces\n\n- BPI_Damageable\n"));
        assert!(md.contains("### EventGraph\n\n**Total Nodes:** 1\n\n#### Execution Flow\n\n"));
        assert!(md.contains("1. **Event BeginPlay** `[Event]`\n"));
        assert!(md.contains("## Dependencies\n\n- `/Script/Engine.GameplayStatics`\n"));

        let order = [
            "## Description",
            "## Components",
            "## Variables",
            "## Functions",
            "## Implemented Interfaces",
            "## Graphs & Node Logic",
            "## Dependencies",
        ];
        let positions: Vec<usize> = order.iter().map(|h| md.find(h).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_dependencies_are_truncated_with_note() {
        let mut record = bare_record();
        record.dependencies = (0..12).map(|i| format!("/Game/Dep{:02}", i)).collect();

        let md = render_markdown(&record, &options());

        assert_eq!(md.matches("- `/Game/Dep").count(), 10);
        assert!(md.contains("- `/Game/Dep09`\n"));
        assert!(!md.contains("/Game/Dep10"));
        assert!(md.contains("_...and 2 more_"));
    }

    #[test]
    fn test_dependencies_within_limit_have_no_note() {
        let mut record = bare_record();
        record.dependencies = (0..10).map(|i| format!("/Game/Dep{}", i)).collect();

        let md = render_markdown(&record, &options());

        assert!(!md.contains("more_"));
    }

    #[test]
    fn test_variable_row_placeholders_and_escaping() {
        let row = variable_row(&Variable {
            name: Some("Mode".to_string()),
            var_type: Some("byte".to_string()),
            category: Some(String::new()),
            is_exposed: Some(true),
            default_value: Some("A|B".to_string()),
        });
        assert_eq!(row, "| Mode | byte | N/A | true | A\\|B |");

        let row = variable_row(&Variable::default());
        assert_eq!(row, "| N/A | N/A | N/A | N/A | N/A |");
    }

    #[test]
    fn test_title_line_breaks_in_record_name() {
        let mut record = bare_record();
        record.name = "BP\nPlayer".to_string();

        let md = render_markdown(&record, &options());

        assert!(md.starts_with("# BP → Player\n"));
    }
}
