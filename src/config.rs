// SPDX-License-Identifier: Apache-2.0 OR MIT
//! Logger configuration types and parsing.
//!
//! JSON5 configuration format supporting:
//! - Feature switches (which capabilities exist at all)
//! - Display toggles (which line segments are rendered)
//! - Registry capacities (fixed for embedded use, or growable)
//! - Comments and trailing commas

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::logging::{Level, LevelStyle};

/// Default size of the buffer handed to the prefix function
pub const DEFAULT_PREFIX_SIZE: usize = 16;

/// Startup configuration for a [`Logger`](crate::Logger)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    /// Which optional capabilities are available
    pub features: Features,

    /// Initial state of the run-time display toggles
    pub display: DisplayOptions,

    /// Minimum level of the console output (slot 0)
    pub console_level: Level,

    /// Total output slots including the console; `None` grows on demand
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_outputs: Option<usize>,

    /// Topic slots; `None` grows on demand
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_topics: Option<usize>,

    /// Bytes available to the prefix function
    pub prefix_size: usize,
}

/// Capability switches
///
/// A switched-off capability keeps its API surface; calls into it return
/// [`LogError::Disabled`](crate::LogError::Disabled) instead.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Features {
    pub topics: bool,
    /// Outputs beyond the console
    pub extra_outputs: bool,
    pub prefix: bool,
    pub time: bool,
    pub color: bool,
    pub source_location: bool,
    /// Allow the display toggles to change after construction
    pub dynamic_config: bool,
    /// Emit one warning through the logger when a disabled feature is used
    pub warn_disabled: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            topics: true,
            extra_outputs: true,
            prefix: true,
            time: true,
            color: true,
            source_location: true,
            dynamic_config: true,
            warn_disabled: true,
        }
    }
}

/// Run-time display toggles; each only takes effect when its feature exists
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayOptions {
    pub color: bool,
    /// Starts off; enable it here or through `Logger::configure_time`
    pub time: bool,
    pub prefix: bool,
    pub topics: bool,
    pub source_location: bool,
    /// Level name table installed at construction or by `Logger::configure_levels`
    pub level_style: LevelStyle,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            color: true,
            time: false,
            prefix: true,
            topics: true,
            source_location: true,
            level_style: LevelStyle::Default,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            features: Features::default(),
            display: DisplayOptions::default(),
            console_level: Level::TRACE,
            max_outputs: None,
            max_topics: None,
            prefix_size: DEFAULT_PREFIX_SIZE,
        }
    }
}

impl LogConfig {
    /// Fixed-capacity configuration with run-time reconfiguration off
    pub fn embedded(max_outputs: usize, max_topics: usize) -> Self {
        Self {
            features: Features {
                dynamic_config: false,
                ..Features::default()
            },
            max_outputs: Some(max_outputs),
            max_topics: Some(max_topics),
            ..Self::default()
        }
    }

    /// Load configuration from a JSON5 file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse(&content)
    }

    /// Parse and validate configuration from a JSON5 string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            json5::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration (pretty JSON, which JSON5 readers accept)
    pub fn to_json5(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Save configuration to a file
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_json5()).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        // The console always occupies slot 0
        if self.max_outputs == Some(0) {
            return Err(ConfigError::ZeroCapacity("max_outputs"));
        }
        if self.max_topics == Some(0) {
            return Err(ConfigError::ZeroCapacity("max_topics"));
        }
        if self.prefix_size == 0 {
            return Err(ConfigError::ZeroPrefixSize);
        }
        if self.console_level > Level::FATAL {
            return Err(ConfigError::ConsoleLevel(self.console_level));
        }
        Ok(())
    }
}

/// Errors from loading or validating a [`LogConfig`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("failed to access config file '{}': {message}", .path.display())]
    Io { path: PathBuf, message: String },

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("{0} must be at least 1 when set")]
    ZeroCapacity(&'static str),

    #[error("prefix_size must be at least 1")]
    ZeroPrefixSize,

    #[error("console level {0:?} is not named by the default level table")]
    ConsoleLevel(Level),

    #[error("global logger is already initialized")]
    AlreadyInitialized,
}
