//! # Graph Detail Rendering
//!
//! Node-by-node breakdown of a Blueprint graph: execution flow traced from
//! event nodes, function call details, variable usage and a full node dump.

use crate::record::{Graph, Node, Pin};
use std::collections::{HashMap, HashSet};
use std::fmt::Write;

use super::{single_line, UNKNOWN};

/// Coarse node classification by substring match on the type tag.
///
/// Checked in declaration order; the first match wins, so a tag such as
/// `EventVariable` is an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Event,
    FunctionCall,
    VariableReference,
    Other,
}

impl NodeKind {
    pub fn classify(type_tag: &str) -> Self {
        if type_tag.contains("Event") {
            Self::Event
        } else if type_tag.contains("CallFunction") {
            Self::FunctionCall
        } else if type_tag.contains("Variable") {
            Self::VariableReference
        } else {
            Self::Other
        }
    }

    pub fn of(node: &Node) -> Self {
        Self::classify(node.type_tag())
    }
}

/// Nodes visited while following an execution chain from one event
#[derive(Debug)]
pub struct ExecutionChain<'a> {
    pub steps: Vec<&'a Node>,
    /// Tracing stopped because the step limit was reached
    pub truncated: bool,
}

/// Renders the detail sections for one graph
pub struct GraphRenderer<'a> {
    graph: &'a Graph,
    lookup: HashMap<&'a str, &'a Node>,
    chain_step_limit: usize,
}

impl<'a> GraphRenderer<'a> {
    pub fn new(graph: &'a Graph, chain_step_limit: usize) -> Self {
        let lookup = graph
            .nodes
            .iter()
            .map(|node| (node.id.as_str(), node))
            .collect();

        Self {
            graph,
            lookup,
            chain_step_limit,
        }
    }

    /// Follow the first resolvable connection of each node, starting at `start`.
    /// Stops on a revisited node, a dead end, or after `chain_step_limit` steps.
    /// Reaching the limit always marks the chain as truncated.
    pub fn trace_execution(&self, start: &'a Node) -> ExecutionChain<'a> {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut steps = Vec::new();
        let mut current = Some(start);

        while let Some(node) = current {
            // Prevent infinite loops
            if !visited.insert(node.id.as_str()) {
                break;
            }
            steps.push(node);

            if steps.len() >= self.chain_step_limit {
                return ExecutionChain {
                    steps,
                    truncated: true,
                };
            }

            // Follow the first connection that resolves to a node in this graph
            current = node
                .connections
                .iter()
                .find_map(|id| self.lookup.get(id.as_str()).copied());
        }

        ExecutionChain {
            steps,
            truncated: false,
        }
    }

    /// Render every detail section for the graph
    pub fn render(&self) -> String {
        let mut md = String::new();

        let mut events = Vec::new();
        let mut calls = Vec::new();
        let mut variables = Vec::new();
        // Sort nodes into sections
        let graph: &'a Graph = self.graph;
        for node in &graph.nodes {
            match NodeKind::of(node) {
                NodeKind::Event => events.push(node),
                NodeKind::FunctionCall => calls.push(node),
                NodeKind::VariableReference => variables.push(node),
                NodeKind::Other => {}
            }
        }

        if !events.is_empty() {
            md.push_str("#### Execution Flow\n\n");
            for event in events {
                self.render_execution_chain(&mut md, event);
            }
            md.push('\n');
        }

        if !calls.is_empty() {
            md.push_str("#### Function Calls\n\n");
            for call in calls {
                render_function_call(&mut md, call);
            }
            md.push('\n');
        }

        if !variables.is_empty() {
            md.push_str("#### Variables Used\n\n");
            for node in variables {
                let _ = writeln!(
                    md,
                    "- **{}** ({})",
                    title_or(node, UNKNOWN),
                    node.node_type.as_deref().unwrap_or(UNKNOWN)
                );
            }
            md.push('\n');
        }

        // Every node, whatever its kind
        md.push_str("#### All Nodes (Detailed)\n\n");
        for (index, node) in self.graph.nodes.iter().enumerate() {
            render_node_detail(&mut md, node, index + 1);
        }

        md
    }

    fn render_execution_chain(&self, md: &mut String, start: &'a Node) {
        let _ = writeln!(md, "**{}**\n", title_or(start, "Unknown Event"));

        let chain = self.trace_execution(start);
        for (index, node) in chain.steps.iter().enumerate() {
            let _ = writeln!(
                md,
                "{}. **{}** `[{}]`",
                index + 1,
                title_or(node, UNKNOWN),
                node.node_type.as_deref().unwrap_or(UNKNOWN)
            );

            // Data pins only
            let inputs: Vec<&Pin> = node.data_inputs().collect();
            if !inputs.is_empty() {
                md.push_str("   - Inputs:\n");
                for pin in inputs {
                    let _ = write!(md, "     - {}: `{}`", pin.label(), pin_type(pin));
                    if let Some(value) = pin.default_text() {
                        let _ = write!(md, " = `{}`", value);
                    }
                    md.push('\n');
                }
            }

            let outputs: Vec<&Pin> = node.data_outputs().collect();
            if !outputs.is_empty() {
                md.push_str("   - Outputs:\n");
                for pin in outputs {
                    let _ = writeln!(md, "     - {}: `{}`", pin.label(), pin_type(pin));
                }
            }

            md.push('\n');
        }

        if chain.truncated {
            md.push_str("   _(Execution chain continues...)_\n\n");
        }
        md.push('\n');
    }
}

fn render_function_call(md: &mut String, node: &Node) {
    let _ = write!(md, "- **{}**", title_or(node, "Unknown Function"));
    if let Some(category) = node.category.as_deref().filter(|c| !c.is_empty()) {
        let _ = write!(md, " _{}_", category);
    }
    md.push('\n');

    let inputs: Vec<&Pin> = node.data_inputs().collect();
    if !inputs.is_empty() {
        md.push_str("  - Parameters:\n");
        for pin in inputs {
            let _ = write!(md, "    - `{}`: {}", pin.label(), pin_type(pin));
            if let Some(value) = pin.default_text() {
                let _ = write!(md, " = `{}`", value);
            }
            md.push('\n');
        }
    }

    let outputs: Vec<&Pin> = node.data_outputs().collect();
    if !outputs.is_empty() {
        md.push_str("  - Returns:\n");
        for pin in outputs {
            let _ = writeln!(md, "    - `{}`: {}", pin.label(), pin_type(pin));
        }
    }

    md.push('\n');
}

fn render_node_detail(md: &mut String, node: &Node, index: usize) {
    let _ = writeln!(md, "**Node {}: {}**", index, title_or(node, UNKNOWN));
    let _ = writeln!(
        md,
        "- Type: `{}`",
        node.node_type.as_deref().unwrap_or(UNKNOWN)
    );
    if let Some(category) = node.category.as_deref().filter(|c| !c.is_empty()) {
        let _ = writeln!(md, "- Category: `{}`", category);
    }
    let id = if node.id.is_empty() { UNKNOWN } else { &node.id };
    let _ = writeln!(md, "- ID: `{}`", id);
    let _ = writeln!(md, "- Position: ({}, {})", node.position.x, node.position.y);

    if !node.pins.is_empty() {
        md.push_str("- Pins:\n");
        for pin in &node.pins {
            let _ = write!(
                md,
                "  - [{}] `{}`: {}",
                pin.direction.as_str(),
                pin.label(),
                pin_type(pin)
            );
            if let Some(value) = pin.default_text() {
                let _ = write!(md, " = `{}`", value);
            }
            md.push('\n');
        }
    }

    if !node.connections.is_empty() {
        let targets: Vec<String> = node
            .connections
            .iter()
            .map(|id| format!("`{}`", id))
            .collect();
        let _ = writeln!(md, "- Connected to: {}", targets.join(", "));
    }

    md.push('\n');
}

fn title_or(node: &Node, fallback: &str) -> String {
    single_line(node.title.as_deref().unwrap_or(fallback))
}

fn pin_type(pin: &Pin) -> &str {
    if pin.pin_type.is_empty() {
        UNKNOWN
    } else {
        &pin.pin_type
    }
}
