// SPDX-License-Identifier: Apache-2.0 OR MIT
// Severity levels and the swappable level-name table

use super::LogError;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::str::FromStr;

/// Log severity (0-7, higher is more severe)
///
/// The default table names levels 0-5; levels 6 and 7 only become usable
/// once a custom [`LevelDescriptor`] (for example the syslog one) is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Level(u8);

impl Level {
    pub const TRACE: Level = Level(0);
    pub const DEBUG: Level = Level(1);
    pub const INFO: Level = Level(2);
    pub const WARN: Level = Level(3);
    pub const ERROR: Level = Level(4);
    pub const FATAL: Level = Level(5);
    pub const LEVEL_6: Level = Level(6);
    pub const LEVEL_7: Level = Level(7);

    /// Highest representable level
    pub const MAX: Level = Level::LEVEL_7;

    /// Number of representable levels
    pub const COUNT: usize = 8;

    /// Get level as u8 (0-7)
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// Create from u8 value (returns None if above 7)
    pub const fn from_u8(value: u8) -> Option<Self> {
        if value <= Self::MAX.0 {
            Some(Level(value))
        } else {
            None
        }
    }

    /// Default display name, independent of the active descriptor
    pub const fn as_str(self) -> &'static str {
        match self.0 {
            0 => "TRACE",
            1 => "DEBUG",
            2 => "INFO",
            3 => "WARN",
            4 => "ERROR",
            5 => "FATAL",
            _ => UNKNOWN_LEVEL,
        }
    }

    /// ANSI color sequence used for this level on the console
    pub(crate) const fn color(self) -> &'static str {
        match self.0 {
            0 => "\x1b[37m",
            1 => "\x1b[36m",
            2 => "\x1b[32m",
            3 => "\x1b[33m",
            4 => "\x1b[31m",
            5 => "\x1b[35m",
            6 => "\x1b[1;31m",
            _ => "\x1b[1;35m",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<u8> for Level {
    type Error = LogError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Level::from_u8(value).ok_or(LogError::InvalidArgument)
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.0
    }
}

impl FromStr for Level {
    type Err = LogError;

    /// Parses a default level name (case-insensitive) or a number
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(value) = trimmed.parse::<u8>() {
            return Level::try_from(value);
        }
        (0..=Level::FATAL.0)
            .map(Level)
            .find(|level| level.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or(LogError::InvalidArgument)
    }
}

/// Marker rendered for a level the active table does not name
pub const UNKNOWN_LEVEL: &str = "?";

const DEFAULT_NAMES: [Cow<'static, str>; Level::COUNT] = [
    Cow::Borrowed("TRACE"),
    Cow::Borrowed("DEBUG"),
    Cow::Borrowed("INFO"),
    Cow::Borrowed("WARN"),
    Cow::Borrowed("ERROR"),
    Cow::Borrowed("FATAL"),
    Cow::Borrowed(""),
    Cow::Borrowed(""),
];

const SHORT_NAMES: [Cow<'static, str>; Level::COUNT] = [
    Cow::Borrowed("T"),
    Cow::Borrowed("D"),
    Cow::Borrowed("I"),
    Cow::Borrowed("W"),
    Cow::Borrowed("E"),
    Cow::Borrowed("F"),
    Cow::Borrowed(""),
    Cow::Borrowed(""),
];

/// Table of level display names plus the highest valid level
///
/// Exactly one descriptor is active per logger. Replacing it swaps the whole
/// table; there is no per-entry edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelDescriptor {
    max_level: Level,
    names: [Cow<'static, str>; Level::COUNT],
}

impl LevelDescriptor {
    /// Build a descriptor; names above `max_level` are ignored
    pub const fn new(max_level: Level, names: [Cow<'static, str>; Level::COUNT]) -> Self {
        Self { max_level, names }
    }

    /// Single-letter names (T, D, I, W, E, F)
    pub const fn short() -> Self {
        Self::new(Level::FATAL, SHORT_NAMES)
    }

    pub const fn max_level(&self) -> Level {
        self.max_level
    }

    /// Check that every level up to `max_level` has a non-empty name
    pub fn validate(&self) -> Result<(), LogError> {
        let used = self.max_level.as_u8() as usize + 1;
        if self.names[..used].iter().any(|name| name.is_empty()) {
            return Err(LogError::InvalidArgument);
        }
        Ok(())
    }

    /// Whether `level` lies inside `[0, max_level]`
    #[inline]
    pub fn contains(&self, level: Level) -> bool {
        level <= self.max_level
    }

    /// Display name for a raw level value; `"?"` when out of range
    pub fn name(&self, level: u8) -> &str {
        match Level::from_u8(level) {
            Some(level) if self.contains(level) => &self.names[level.as_u8() as usize],
            _ => UNKNOWN_LEVEL,
        }
    }
}

impl Default for LevelDescriptor {
    fn default() -> Self {
        Self::new(Level::FATAL, DEFAULT_NAMES)
    }
}

/// Built-in level name tables selectable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelStyle {
    /// TRACE, DEBUG, INFO, WARN, ERROR, FATAL
    #[default]
    Default,
    /// T, D, I, W, E, F
    Short,
}

impl LevelStyle {
    pub fn descriptor(self) -> LevelDescriptor {
        match self {
            LevelStyle::Default => LevelDescriptor::default(),
            LevelStyle::Short => LevelDescriptor::short(),
        }
    }
}
