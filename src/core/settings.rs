//! Settings store and logger configuration
//!
//! [`Settings`] is the mutable, worker-owned state; [`LoggerConfig`] is the
//! serde-backed description a logger is constructed from.

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Runtime settings, only ever touched by the worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub enabled: bool,
    pub output_tags: bool,
    label: String,
}

impl Settings {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            enabled: true,
            output_tags: false,
            label: label.into(),
        }
    }

    /// Fixed at construction
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Whether debug-only levels are compiled in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    Debug,
    Release,
}

impl BuildMode {
    /// The mode of the current compilation
    pub const fn current() -> Self {
        if cfg!(debug_assertions) {
            BuildMode::Debug
        } else {
            BuildMode::Release
        }
    }

    /// True when `level` must be discarded before its message is built
    #[inline]
    pub fn rejects(&self, level: LogLevel) -> bool {
        matches!(self, BuildMode::Release) && level.is_debug_only()
    }
}

impl Default for BuildMode {
    fn default() -> Self {
        Self::current()
    }
}

/// Serializable logger configuration
///
/// # Example
///
/// ```
/// use tagged_logger::LoggerConfig;
///
/// let config = LoggerConfig::from_json_str(
///     r#"{ "label": "Auth", "output_tags": true, "ignored_tags": ["secret"] }"#,
/// ).unwrap();
/// assert_eq!(config.label, "Auth");
/// assert!(config.enabled);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub label: String,
    pub enabled: bool,
    pub output_tags: bool,
    pub allowed_tags: Vec<String>,
    pub ignored_tags: Vec<String>,
    pub build_mode: BuildMode,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            label: String::new(),
            enabled: true,
            output_tags: false,
            allowed_tags: Vec::new(),
            ignored_tags: Vec::new(),
            build_mode: BuildMode::current(),
        }
    }
}

impl LoggerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.label.contains(|c: char| c == '\n' || c == '\r') {
            return Err(LoggerError::config(
                "LoggerConfig",
                "label must be a single line",
            ));
        }
        // The label also names the worker thread
        if self.label.contains('\0') {
            return Err(LoggerError::config(
                "LoggerConfig",
                "label must not contain NUL bytes",
            ));
        }
        Ok(())
    }

    pub(crate) fn settings(&self) -> Settings {
        Settings {
            enabled: self.enabled,
            output_tags: self.output_tags,
            label: self.label.clone(),
        }
    }
}
