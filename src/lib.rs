// SPDX-License-Identifier: Apache-2.0 OR MIT
//! Small embeddable logger with level, topic and per-output filtering.
//!
//! A [`Logger`] owns a console output (id 0) plus any number of extra
//! outputs, each with its own minimum level, and a set of named topics
//! that can be switched on and off independently. Optional pieces (topics,
//! extra outputs, prefix, time, color, source location) are selected in
//! [`LogConfig`]; calling into a switched-off piece returns
//! [`LogError::Disabled`].
//!
//! ```
//! use microlog::{log_info, log_warn, BufferSink, LogConfig, Logger, OutputTarget};
//!
//! let console = BufferSink::new();
//! let logger = Logger::with_console(LogConfig::default(), console.clone()).unwrap();
//! logger.add_topic("net", OutputTarget::All, true).unwrap();
//!
//! log_info!(logger, "starting");
//! log_warn!(logger, topic = "net", "link {} down", 2);
//! assert_eq!(console.len(), 2);
//! assert!(console.lines()[1].contains("[net]"));
//! ```

pub mod config;
pub mod logging;

pub use config::{ConfigError, DisplayOptions, Features, LogConfig};
pub use logging::{
    global, BlockingLock, BufferSink, ConsoleSink, FileSink, Level, LevelDescriptor, LevelStyle,
    LockAdapter, LogError, LogEvent, LogSink, Logger, OutputId, OutputTarget, PrefixBuffer, Record,
    RenderOptions, Topic, TopicId, TryLock,
};
