//! # Markdown Rendering
//!
//! Pure rendering of Blueprint records into Markdown documents.

mod graph;
mod markdown;

pub use graph::{ExecutionChain, GraphRenderer, NodeKind};
pub use markdown::*;

use crate::config::ExportConfig;

/// Placeholder shown for absent names and types
pub(crate) const UNKNOWN: &str = "Unknown";

/// Separator shown in place of line breaks inside titles
pub const LINE_BREAK_TOKEN: &str = " → ";

/// Rendering knobs taken from the export configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub dependency_limit: usize,
    pub chain_step_limit: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from(&ExportConfig::default())
    }
}

impl From<&ExportConfig> for RenderOptions {
    fn from(config: &ExportConfig) -> Self {
        Self {
            dependency_limit: config.dependency_limit,
            chain_step_limit: config.chain_step_limit,
        }
    }
}

/// Collapse embedded line breaks into a visible separator
pub fn single_line(text: &str) -> String {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\n', LINE_BREAK_TOKEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("Set Health"), "Set Health");
        assert_eq!(
            single_line("Print String\nTarget is Kismet System Library"),
            "Print String → Target is Kismet System Library"
        );
        assert_eq!(single_line("A\r\nB\rC"), "A → B → C");
    }
}
