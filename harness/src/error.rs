//! Harness errors.

use std::path::PathBuf;

use thiserror::Error;
use wayfind_graph::GraphError;
use wayfind_search::canon::CanonError;
use wayfind_search::SearchError;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("map is invalid: {0}")]
    Graph(#[from] GraphError),

    #[error("search failed: {0}")]
    Search(#[from] SearchError),

    #[error("trace serialization failed: {0}")]
    Canon(#[from] CanonError),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Config files must end in `.toml` or `.json`.
    #[error("unsupported file format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    /// A required file is missing from a report directory.
    #[error("missing file in report directory: {name}")]
    MissingFile { name: String },

    /// Stored and recomputed trace digests disagree.
    #[error("trace digest mismatch: stored={stored}, recomputed={recomputed}")]
    DigestMismatch { stored: String, recomputed: String },
}

impl HarnessError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
