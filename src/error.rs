//! # Export Errors
//!
//! Error taxonomy for the Blueprint exporter.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while acquiring, rendering or writing Blueprint documentation
#[derive(Debug, Error)]
pub enum ExportError {
    /// The rich graph extractor is not installed
    #[error("graph extractor is not available")]
    MissingCapability,

    /// The rich graph extractor is installed but failed
    #[error("graph extraction failed: {0}")]
    Extraction(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An asset path that cannot be mapped into the output tree
    #[error("invalid asset path: {0}")]
    InvalidAssetPath(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ExportError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = ExportError> = std::result::Result<T, E>;
