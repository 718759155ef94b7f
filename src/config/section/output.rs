//! `[output]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [output]
//! suffix = "-converted"       # drawing.svg -> drawing-converted.svg
//! ```
//!
//! Inputs whose file name already contains the suffix are treated as
//! generated and skipped in batch runs.

use serde::{Deserialize, Serialize};

/// Default suffix for generated files
pub const DEFAULT_SUFFIX: &str = "-converted";

/// Output naming settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Appended to the file stem of generated files.
    pub suffix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            suffix: DEFAULT_SUFFIX.to_string(),
        }
    }
}
