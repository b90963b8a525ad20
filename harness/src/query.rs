//! Route query configuration.
//!
//! A query names start and end points as percentages of the map extent and
//! optionally a search policy:
//!
//! ```toml
//! start = [10.0, 10.0]
//! end = [90.0, 85.0]
//!
//! [policy]
//! max_expansions = 5000
//! neighbor_policy = "strict"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use wayfind_search::SearchPolicy;

use crate::error::HarnessError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteQuery {
    /// Start point, `[x, y]` in percent.
    pub start: [f64; 2],
    /// End point, `[x, y]` in percent.
    pub end: [f64; 2],
    #[serde(default)]
    pub policy: SearchPolicy,
}

impl RouteQuery {
    #[must_use]
    pub fn new(start: [f64; 2], end: [f64; 2]) -> Self {
        Self {
            start,
            end,
            policy: SearchPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: SearchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// # Errors
    ///
    /// Returns [`HarnessError::Toml`] on malformed input.
    pub fn from_toml_str(s: &str) -> Result<Self, HarnessError> {
        Ok(toml::from_str(s)?)
    }

    /// # Errors
    ///
    /// Returns [`HarnessError::Json`] on malformed input.
    pub fn from_json_str(s: &str) -> Result<Self, HarnessError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load a query from a `.toml` or `.json` file.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::UnsupportedFormat`] for other extensions,
    /// [`HarnessError::Io`] if the file cannot be read, and a parse error if
    /// the content is invalid.
    pub fn load(path: &Path) -> Result<Self, HarnessError> {
        let ext = path.extension().and_then(|e| e.to_str());
        if !matches!(ext, Some("toml" | "json")) {
            return Err(HarnessError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        }
        let text = std::fs::read_to_string(path).map_err(|e| HarnessError::io(path, e))?;
        match ext {
            Some("toml") => Self::from_toml_str(&text),
            _ => Self::from_json_str(&text),
        }
    }
}
