//! # Blueprint Documentation Exporter (bpdoc)
//!
//! Turns extracted Blueprint metadata into documentation that external tools and
//! assistants can read: a canonical JSON file and a Markdown page per Blueprint,
//! plus an `index.md` across everything exported.
//!
//! bpdoc does not look inside the engine itself. Blueprint internals arrive
//! through two seams:
//! - [`GraphExtractor`] - a rich extractor (usually a native editor plugin) that
//!   returns the full record, graph nodes included, as JSON
//! - [`BlueprintAsset`] - the basic reflection surface used when the rich
//!   extractor is missing or fails
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bpdoc::{DumpDirectory, ExportConfig, Exporter};
//! use std::path::Path;
//!
//! let config = ExportConfig::default();
//! let dumps = DumpDirectory::open(Path::new("Saved/BlueprintDumps"))?;
//! let extractor = dumps.extractor();
//!
//! let report = Exporter::new(&config, Some(&extractor)).export_all(&dumps);
//! println!("Exported {} blueprints", report.exported);
//! # Ok::<(), bpdoc::ExportError>(())
//! ```
//!
//! ## Pipeline
//!
//! For every asset:
//!
//! 1. **Acquisition** - rich record from the extractor, or a reduced record
//! 2. **JSON** - the record is written as pretty-printed JSON
//! 3. **Markdown** - the same record is rendered to Markdown
//!
//! After the batch, `index.md` is rebuilt from the Markdown files on disk.

pub mod acquire;
pub mod config;
pub mod error;
pub mod exporter;
pub mod index;
pub mod logging;
pub mod output;
pub mod record;
pub mod regenerate;
pub mod render;

// Re-export the main export API
pub use exporter::{write_json, ExportFailure, ExportReport, ExportedFiles, Exporter};

pub use acquire::{
    reflect_record, Acquisition, AssetRegistry, BlueprintAsset, DumpDirectory, DumpExtractor,
    DumpedAsset, GraphExtractor, RecordAcquirer, RecordSource, ReflectedComponent, RichExtraction,
};
pub use config::ExportConfig;
pub use error::{ExportError, Result};
pub use index::{write_index, BlueprintIndex, IndexEntry, IndexSummary};
pub use output::OutputLayout;
pub use record::{
    BlueprintRecord, Component, Function, Graph, Node, Parameter, Pin, PinDirection, Position,
    Variable,
};
pub use regenerate::{regenerate_markdown, RegenerateReport};
pub use render::{render_markdown, MarkdownRenderer, NodeKind, RenderOptions};
