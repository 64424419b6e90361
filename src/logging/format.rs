// SPDX-License-Identifier: Apache-2.0 OR MIT
// Line rendering: [time] [level] [prefix] [topic] [file:line:] message

use super::event::LogEvent;
use std::fmt::{self, Write};

const COLOR_RESET: &str = "\x1b[0m";
const TIME_SHORT: &str = "%H:%M:%S";
const TIME_FULL: &str = "%Y-%m-%d %H:%M:%S";

/// How a sink wants the line rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Wrap the level string in ANSI color (only if color is enabled)
    pub color: bool,
    /// Include the date in the timestamp
    pub full_date: bool,
}

/// Write the full line for `event` into `out`
///
/// Disabled segments are skipped together with their separator, so the
/// message is always preceded by exactly one space per rendered segment.
pub(crate) fn write_line(
    event: &LogEvent<'_>,
    out: &mut dyn Write,
    options: RenderOptions,
) -> fmt::Result {
    let style = event.style();

    if let Some(time) = event.time() {
        let pattern = if options.full_date { TIME_FULL } else { TIME_SHORT };
        write!(out, "{} ", time.format(pattern))?;
    }

    let level_name = style.levels.name(event.level().as_u8());
    if options.color && style.color {
        write!(out, "{}{}{} ", event.level().color(), level_name, COLOR_RESET)?;
    } else {
        write!(out, "{} ", level_name)?;
    }

    if let Some(prefix) = event.prefix() {
        write!(out, "{} ", prefix)?;
    }

    if style.topics {
        if let Some(topic) = event.topic_name() {
            write!(out, "[{}] ", topic)?;
        }
    }

    if style.source_location {
        write!(out, "{}:{}: ", event.file(), event.line())?;
    }

    out.write_fmt(event.message())
}

/// `fmt::Write` over a byte slice that truncates instead of failing
///
/// One byte is always kept back for the NUL terminator written by
/// [`finish`](Self::finish). Truncation never splits a UTF-8 sequence.
pub(crate) struct BoundedWriter<'a> {
    buf: &'a mut [u8],
    len: usize,
    truncated: bool,
}

impl<'a> BoundedWriter<'a> {
    /// Returns None for an empty slice (no room for the terminator)
    pub(crate) fn new(buf: &'a mut [u8]) -> Option<Self> {
        if buf.is_empty() {
            return None;
        }
        Some(Self {
            buf,
            len: 0,
            truncated: false,
        })
    }

    /// Terminate the written text; returns its length without the NUL
    pub(crate) fn finish(self) -> usize {
        self.buf[self.len] = 0;
        self.len
    }
}

impl Write for BoundedWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        // Output stays a prefix of the full text: nothing after a cut
        if self.truncated {
            return Ok(());
        }
        let room = self.buf.len() - 1 - self.len;
        let take = floor_char_boundary(s, room);
        self.buf[self.len..self.len + take].copy_from_slice(&s.as_bytes()[..take]);
        self.len += take;
        self.truncated = take < s.len();
        Ok(())
    }
}

/// Prefix text produced by the user prefix function
///
/// Holds at most `capacity` bytes; anything written past that is dropped.
#[derive(Debug)]
pub struct PrefixBuffer {
    text: String,
    capacity: usize,
    truncated: bool,
}

impl PrefixBuffer {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            text: String::with_capacity(capacity),
            capacity,
            truncated: false,
        }
    }

    /// Bytes that can still be written
    pub fn remaining(&self) -> usize {
        self.capacity - self.text.len()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub(crate) fn into_string(self) -> String {
        self.text
    }
}

impl Write for PrefixBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.truncated {
            return Ok(());
        }
        let take = floor_char_boundary(s, self.remaining());
        self.text.push_str(&s[..take]);
        self.truncated = take < s.len();
        Ok(())
    }
}

/// Largest index `<= max` that falls on a char boundary of `s`
fn floor_char_boundary(s: &str, max: usize) -> usize {
    if max >= s.len() {
        return s.len();
    }
    let mut idx = max;
    while !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}
