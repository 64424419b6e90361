// SPDX-License-Identifier: Apache-2.0 OR MIT
// Read-only view of one log call, handed to sinks and the prefix function

use super::format::{self, BoundedWriter, RenderOptions};
use super::{Level, LevelDescriptor, LogError, TopicId};
use chrono::{DateTime, Local};
use std::fmt::{self, Write};
use std::sync::Arc;

/// Rendering state captured once per dispatch
///
/// Each flag already combines the feature switch with its display toggle.
#[derive(Debug, Clone)]
pub(crate) struct Style {
    pub(crate) levels: Arc<LevelDescriptor>,
    pub(crate) color: bool,
    pub(crate) topics: bool,
    pub(crate) source_location: bool,
}

/// One log event
///
/// Lives only for the duration of the dispatch that created it; sinks must
/// copy out whatever they want to keep. The timestamp is captured once per
/// call, so every sink sees the same instant.
#[derive(Clone, Copy)]
pub struct LogEvent<'a> {
    level: Level,
    file: &'a str,
    line: u32,
    topic: Option<(TopicId, &'a str)>,
    message: fmt::Arguments<'a>,
    time: Option<DateTime<Local>>,
    prefix: Option<&'a str>,
    style: &'a Style,
}

impl<'a> LogEvent<'a> {
    pub(crate) fn new(
        level: Level,
        file: &'a str,
        line: u32,
        topic: Option<(TopicId, &'a str)>,
        message: fmt::Arguments<'a>,
        time: Option<DateTime<Local>>,
        style: &'a Style,
    ) -> Self {
        Self {
            level,
            file,
            line,
            topic,
            message,
            time,
            prefix: None,
            style,
        }
    }

    pub(crate) fn with_prefix(self, prefix: Option<&'a str>) -> Self {
        Self { prefix, ..self }
    }

    pub(crate) fn style(&self) -> &Style {
        self.style
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Level name from the level table active when the event was created
    pub fn level_name(&self) -> &str {
        self.style.levels.name(self.level.as_u8())
    }

    /// Source file of the log call
    pub fn file(&self) -> &'a str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    /// Resolved topic, None for a call without topic
    pub fn topic(&self) -> Option<TopicId> {
        self.topic.map(|(id, _)| id)
    }

    pub fn topic_name(&self) -> Option<&'a str> {
        self.topic.map(|(_, name)| name)
    }

    /// Timestamp, None when the time feature is off
    pub fn time(&self) -> Option<DateTime<Local>> {
        self.time
    }

    /// Prefix text produced by the prefix function for this event
    pub fn prefix(&self) -> Option<&'a str> {
        self.prefix
    }

    /// Unformatted message arguments
    pub fn message(&self) -> fmt::Arguments<'a> {
        self.message
    }

    /// Write the message alone into `buf`, NUL-terminated and truncated to fit
    ///
    /// Returns the number of bytes written before the terminator.
    pub fn message_to_buffer(&self, buf: &mut [u8]) -> Result<usize, LogError> {
        let mut writer = BoundedWriter::new(buf).ok_or(LogError::InvalidArgument)?;
        // BoundedWriter never fails; a failing Display impl just stops early
        let _ = writer.write_fmt(self.message);
        Ok(writer.finish())
    }

    /// Render the full line without color
    pub fn render(&self) -> String {
        self.render_with(RenderOptions::default())
    }

    pub fn render_with(&self, options: RenderOptions) -> String {
        let mut line = String::new();
        let _ = format::write_line(self, &mut line, options);
        line
    }

    /// Write the full line into `buf`, NUL-terminated and truncated to fit
    pub fn to_buffer(&self, buf: &mut [u8]) -> Result<usize, LogError> {
        let mut writer = BoundedWriter::new(buf).ok_or(LogError::InvalidArgument)?;
        let _ = format::write_line(self, &mut writer, RenderOptions::default());
        Ok(writer.finish())
    }
}

impl fmt::Display for LogEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format::write_line(self, f, RenderOptions::default())
    }
}

impl fmt::Debug for LogEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("LogEvent");
        debug
            .field("level", &self.level)
            .field("file", &self.file)
            .field("line", &self.line)
            .field("message", &self.message.to_string());

        if let Some(topic) = self.topic_name() {
            debug.field("topic", &topic);
        }

        debug.finish()
    }
}
