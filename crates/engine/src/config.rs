//! Engine configuration via `phi.toml`
//!
//! The packaging layer places a `phi.toml` next to the object graphs it
//! materializes. Missing fields fall back to defaults, so an empty file is
//! a valid configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Config file name placed in the project directory.
pub const CONFIG_FILE_NAME: &str = "phi.toml";

/// Default bound on dataization nesting
///
/// Sized for the 2 MiB stack of a spawned thread: a dataization at full
/// depth stays under half of it in an unoptimized build.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Failure loading or storing a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read or written
    #[error("config file '{path}': {source}")]
    Io {
        /// Offending path
        path: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// File content is not valid TOML for this schema
    #[error("failed to parse config file '{path}': {message}")]
    Parse {
        /// Offending path
        path: String,
        /// Parser message
        message: String,
    },

    /// Configuration could not be serialized
    #[error("failed to serialize config: {0}")]
    Serialize(String),

    /// A value is out of range
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Engine configuration loaded from `phi.toml`.
///
/// # Example
///
/// ```toml
/// # Maximum nesting of attribute evaluations in one dataization
/// max_depth = 128
///
/// # Emit a trace event for every dataization step
/// trace_dataization = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum nesting of composite evaluations (and of one Δ/φ chain).
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Emit a `trace` event for every dataization step.
    #[serde(default)]
    pub trace_dataization: bool,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            trace_dataization: false,
        }
    }
}

impl EngineConfig {
    /// Check that every value is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid(
                "max_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Phi engine configuration
#
# Maximum nesting of attribute evaluations in one dataization (default: 128).
# Deeper graphs fail with a depth error instead of exhausting the stack.
# Each level costs about 5 KiB of stack; raise this only for threads
# spawned with a larger stack.
max_depth = 128

# Emit a trace event for every dataization step (default: false).
trace_dataization = false
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: EngineConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<(), ConfigError> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|source| ConfigError::Io {
                path: path.display().to_string(),
                source,
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}
