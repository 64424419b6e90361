// SPDX-License-Identifier: Apache-2.0 OR MIT
//! RFC 5424 style severity names over the eight level slots.
//!
//! Syslog numbers severities from 0 (emergency) to 7 (debug); here the
//! order is flipped so that a higher [`Level`] is still more severe and
//! output filtering keeps working unchanged.

use super::{Level, LevelDescriptor, LogError, Logger};
use std::borrow::Cow;

/// Syslog severities mapped onto [`Level`]
#[derive(Debug, Clone, Copy)]
pub struct SyslogLevel;

impl SyslogLevel {
    pub const DEBUG: Level = Level::TRACE;
    pub const INFO: Level = Level::DEBUG;
    pub const NOTICE: Level = Level::INFO;
    pub const WARN: Level = Level::WARN;
    pub const ERR: Level = Level::ERROR;
    pub const CRIT: Level = Level::FATAL;
    pub const ALERT: Level = Level::LEVEL_6;
    pub const EMERG: Level = Level::LEVEL_7;
}

/// Label style of the syslog level table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyslogStyle {
    /// Six-character names padded for column alignment
    #[default]
    Long,
    /// Three-letter abbreviations
    Short,
}

const LONG_NAMES: [Cow<'static, str>; Level::COUNT] = [
    Cow::Borrowed("DEBUG "),
    Cow::Borrowed("INFO  "),
    Cow::Borrowed("NOTICE"),
    Cow::Borrowed("WARN  "),
    Cow::Borrowed("ERR   "),
    Cow::Borrowed("CRIT  "),
    Cow::Borrowed("ALERT "),
    Cow::Borrowed("EMERG "),
];

const SHORT_NAMES: [Cow<'static, str>; Level::COUNT] = [
    Cow::Borrowed("DBG"),
    Cow::Borrowed("INF"),
    Cow::Borrowed("NOT"),
    Cow::Borrowed("WRN"),
    Cow::Borrowed("ERR"),
    Cow::Borrowed("CRT"),
    Cow::Borrowed("ALR"),
    Cow::Borrowed("EMR"),
];

/// Level table for `style`, using all eight levels
pub const fn descriptor(style: SyslogStyle) -> LevelDescriptor {
    match style {
        SyslogStyle::Long => LevelDescriptor::new(Level::MAX, LONG_NAMES),
        SyslogStyle::Short => LevelDescriptor::new(Level::MAX, SHORT_NAMES),
    }
}

/// Switch `logger` to syslog level names
pub fn enable(logger: &Logger, style: SyslogStyle) -> Result<(), LogError> {
    logger.set_levels(descriptor(style))
}

/// Restore the default level names
pub fn disable(logger: &Logger) -> Result<(), LogError> {
    logger.reset_levels()
}

/// Style of the active table, if it is one of the syslog tables
///
/// Reads the logger's current table, so a later `set_levels` with some
/// other table is reflected immediately.
pub fn active_style(logger: &Logger) -> Option<SyslogStyle> {
    let levels = logger.levels();
    [SyslogStyle::Long, SyslogStyle::Short]
        .into_iter()
        .find(|style| *levels == descriptor(*style))
}

pub fn is_active(logger: &Logger) -> bool {
    active_style(logger).is_some()
}
