// SPDX-License-Identifier: Apache-2.0 OR MIT
// Output sinks: where rendered events end up

use super::event::LogEvent;
use super::format::RenderOptions;
use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

/// Destination for log events
///
/// Called without any logger lock held, so an implementation may log
/// again (the nested call completes before this one continues). The event
/// is only valid for the duration of the call.
pub trait LogSink: Send + Sync {
    fn write_event(&self, event: &LogEvent<'_>);
}

impl<F> LogSink for F
where
    F: Fn(&LogEvent<'_>) + Send + Sync,
{
    fn write_event(&self, event: &LogEvent<'_>) {
        self(event)
    }
}

/// Standard output sink, the default occupant of the console slot
///
/// The only built-in sink that renders level colors.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl LogSink for ConsoleSink {
    fn write_event(&self, event: &LogEvent<'_>) {
        let line = event.render_with(RenderOptions {
            color: true,
            full_date: false,
        });
        let mut stdout = std::io::stdout().lock();
        let _ = writeln!(stdout, "{}", line);
        let _ = stdout.flush();
    }
}

/// Sink writing one line per event to any [`Write`] handle
///
/// Timestamps include the date. The handle is flushed after every line but
/// never opened or closed here; that is up to the owner.
pub struct FileSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> FileSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Give the handle back to the caller
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> LogSink for FileSink<W> {
    fn write_event(&self, event: &LogEvent<'_>) {
        let line = event.render_with(RenderOptions {
            color: false,
            full_date: true,
        });
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        // I/O failures are dropped: logging never reports back to the caller
        let _ = writeln!(writer, "{}", line);
        let _ = writer.flush();
    }
}

/// In-memory sink keeping every rendered line
///
/// Clones share the same buffer, so one handle can be registered while
/// another is kept for inspection.
#[derive(Debug, Default, Clone)]
pub struct BufferSink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the captured lines, oldest first
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl LogSink for BufferSink {
    fn write_event(&self, event: &LogEvent<'_>) {
        let line = event.render();
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line);
    }
}
