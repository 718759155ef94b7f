//! Configuration management for `shaper.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── convert    # [convert]
//! │   └── output     # [output]
//! ├── error          # ConfigError
//! ├── util           # config file lookup
//! └── mod.rs         # Config (this file)
//! ```
//!
//! The file is optional. Without one every section takes its defaults.

mod error;
mod section;
mod util;

pub use error::ConfigError;
pub use section::{ConvertConfig, OutputConfig};

use util::find_config_file;

use crate::{debug, log};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default config file name, searched upward from the working directory
pub const CONFIG_FILE: &str = "shaper.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing shaper.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Absolute path of the loaded file; `None` when running on defaults
    #[serde(skip)]
    pub path: Option<PathBuf>,

    /// Output naming
    #[serde(default)]
    pub output: OutputConfig,

    /// Forward conversion settings
    #[serde(default)]
    pub convert: ConvertConfig,
}

impl Config {
    /// Load the configuration.
    ///
    /// An explicit path must exist. Otherwise `shaper.toml` is searched
    /// upward from the working directory and defaults are used when none
    /// is found.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let cwd =
                    std::env::current_dir().context("Failed to get current working directory")?;
                find_config_file(&cwd, Path::new(CONFIG_FILE))
            }
        };

        let Some(path) = path else {
            debug!("config"; "no {} found, using defaults", CONFIG_FILE);
            return Ok(Self::default());
        };

        let mut config = Self::from_path(&path)?;
        config.validate()?;
        debug!("config"; "loaded {}", path.display());
        config.path = Some(path);
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        log!("warning"; "unknown fields in {}, ignoring:", path.display());
        for field in fields {
            log!("warning"; "- {}", field);
        }
    }

    /// Check values serde cannot reject on its own.
    fn validate(&self) -> Result<(), ConfigError> {
        let suffix = &self.output.suffix;
        if suffix.trim().is_empty() {
            return Err(ConfigError::Validation("`output.suffix` must not be empty".into()));
        }
        if suffix.contains(['/', '\\']) {
            return Err(ConfigError::Validation(format!(
                "`output.suffix` must not contain a path separator, got `{suffix}`"
            )));
        }
        if self.convert.stroke_width.trim().is_empty() {
            return Err(ConfigError::Validation(
                "`convert.stroke_width` must not be empty".into(),
            ));
        }
        for token in &self.convert.attrs {
            token.warn_if_unknown("`convert.attrs`");
        }
        Ok(())
    }
}

/// Parse a config snippet for section tests.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> Config {
    let (config, _) = Config::parse_with_ignored(content).unwrap();
    config
}

// ============================================================================
// tests
// ============================================================================
