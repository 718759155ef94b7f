//! `[convert]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [convert]
//! stroke_width = "0.1"                      # written on every drawable
//! attrs = ["shaper:cutDepth=3mm"]           # applied where nothing else sets the name
//! ```

use serde::{Deserialize, Serialize};

use crate::shaper::{DEFAULT_STROKE_WIDTH, ShaperToken};

/// Forward conversion settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// `stroke-width` value for drawable elements.
    pub stroke_width: String,

    /// Global tokens, applied after those given with `-g`.
    pub attrs: Vec<ShaperToken>,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            stroke_width: DEFAULT_STROKE_WIDTH.to_string(),
            attrs: Vec::new(),
        }
    }
}
