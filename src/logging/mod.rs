// SPDX-License-Identifier: Apache-2.0 OR MIT
// Embeddable logging: level and topic filtering, fan-out to output sinks
//
// A log call is filtered against the topic and output registries, turned
// into one LogEvent and handed to every qualifying sink in output id
// order. No internal or adapter lock is held while user code runs.

mod error;
mod event;
mod format;
mod global;
mod level;
mod lock;
mod logger;
#[macro_use]
mod macros;
mod output;
mod sink;
pub mod syslog;
mod topic;

// Public exports
pub use error::LogError;
pub use event::LogEvent;
pub use format::{PrefixBuffer, RenderOptions};
pub use global::{global, init};
pub use level::{Level, LevelDescriptor, LevelStyle, UNKNOWN_LEVEL};
pub use lock::{BlockingLock, LockAdapter, TryLock};
pub use logger::{Logger, Record};
pub use output::{OutputId, OutputTarget};
pub use sink::{BufferSink, ConsoleSink, FileSink, LogSink};
pub use topic::{Topic, TopicId};
