// SPDX-License-Identifier: Apache-2.0 OR MIT
// Logger context and the dispatch engine

use super::event::{LogEvent, Style};
use super::format::PrefixBuffer;
use super::lock::{LockAdapter, LockGuard};
use super::output::{OutputId, OutputRegistry, OutputTarget};
use super::sink::{ConsoleSink, FileSink, LogSink};
use super::topic::{Topic, TopicId, TopicRegistry};
use super::{Level, LevelDescriptor, LevelStyle, LogError};
use crate::config::{ConfigError, DisplayOptions, Features, LogConfig};
use chrono::Local;
use std::cell::Cell;
use std::fmt;
use std::io::Write;
use std::panic::Location;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

type PrefixFn = dyn Fn(&LogEvent<'_>, &mut PrefixBuffer) + Send + Sync;

thread_local! {
    // Set while the logger emits its own diagnostic on this thread
    static IN_DIAGNOSTIC: Cell<bool> = const { Cell::new(false) };
}

/// One log call as produced by the `log_*!` macros
#[derive(Clone, Copy)]
pub struct Record<'a> {
    level: Level,
    file: &'a str,
    line: u32,
    topic: Option<&'a str>,
    target: OutputTarget,
    message: fmt::Arguments<'a>,
}

impl<'a> Record<'a> {
    pub fn new(level: Level, file: &'a str, line: u32, message: fmt::Arguments<'a>) -> Self {
        Self {
            level,
            file,
            line,
            topic: None,
            target: OutputTarget::All,
            message,
        }
    }

    /// Record located at the caller
    #[track_caller]
    pub fn here(level: Level, message: fmt::Arguments<'a>) -> Self {
        let location = Location::caller();
        Self::new(level, location.file(), location.line(), message)
    }

    /// Route through a named topic; an unknown name drops the event
    pub fn topic(self, name: &'a str) -> Self {
        Self {
            topic: Some(name),
            ..self
        }
    }

    /// Restrict this call to a single output
    pub fn output(self, target: impl Into<OutputTarget>) -> Self {
        Self {
            target: target.into(),
            ..self
        }
    }
}

struct State {
    outputs: OutputRegistry,
    topics: TopicRegistry,
    levels: Arc<LevelDescriptor>,
    display: DisplayOptions,
    prefix: Option<Arc<PrefixFn>>,
    lock: Option<Arc<dyn LockAdapter>>,
}

/// Rendering inputs taken once per dispatch
struct Snapshot {
    style: Style,
    time: bool,
    prefix: Option<Arc<PrefixFn>>,
}

#[derive(Debug, Clone, Copy)]
enum Toggle {
    Color,
    Time,
    Prefix,
    Topics,
    SourceLocation,
}

impl Toggle {
    fn name(self) -> &'static str {
        match self {
            Toggle::Color => "color",
            Toggle::Time => "time",
            Toggle::Prefix => "prefix",
            Toggle::Topics => "topics",
            Toggle::SourceLocation => "source location",
        }
    }

    fn available(self, features: &Features) -> bool {
        match self {
            Toggle::Color => features.color,
            Toggle::Time => features.time,
            Toggle::Prefix => features.prefix,
            Toggle::Topics => features.topics,
            Toggle::SourceLocation => features.source_location,
        }
    }

    fn flag(self, display: &mut DisplayOptions) -> &mut bool {
        match self {
            Toggle::Color => &mut display.color,
            Toggle::Time => &mut display.time,
            Toggle::Prefix => &mut display.prefix,
            Toggle::Topics => &mut display.topics,
            Toggle::SourceLocation => &mut display.source_location,
        }
    }
}

/// Logging context owning outputs, topics and the level table
///
/// Every method takes `&self`; a `Logger` can be shared between threads
/// as-is. Cross-thread ordering of whole dispatches is only guaranteed
/// once a [`LockAdapter`] is registered with [`set_lock`](Self::set_lock).
pub struct Logger {
    features: Features,
    prefix_size: usize,
    state: RwLock<State>,
}

impl Default for Logger {
    fn default() -> Self {
        Self::build(LogConfig::default(), Arc::new(ConsoleSink::new()))
    }
}

impl Logger {
    /// Create a logger whose console slot writes to stdout
    pub fn new(config: LogConfig) -> Result<Self, ConfigError> {
        Self::with_console(config, ConsoleSink::new())
    }

    /// Create a logger with a custom sink in the console slot
    pub fn with_console(
        config: LogConfig,
        console: impl LogSink + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, Arc::new(console)))
    }

    fn build(config: LogConfig, console: Arc<dyn LogSink>) -> Self {
        let state = State {
            outputs: OutputRegistry::new(console, config.console_level, config.max_outputs),
            topics: TopicRegistry::new(config.max_topics),
            levels: Arc::new(config.display.level_style.descriptor()),
            display: config.display,
            prefix: None,
            lock: None,
        };
        Self {
            features: config.features,
            prefix_size: config.prefix_size,
            state: RwLock::new(state),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run an administrative change under the registered lock adapter
    fn update<T>(&self, change: impl FnOnce(&mut State) -> Result<T, LogError>) -> Result<T, LogError> {
        let adapter = self.read().lock.clone();
        let _guard = LockGuard::acquire_opt(adapter.as_ref())?;
        let mut state = self.write();
        change(&mut state)
    }

    /// Report a call into a switched-off feature
    ///
    /// Emits one WARN through this logger unless already inside such a
    /// warning on this thread. Must not be called with the state locked.
    #[track_caller]
    fn disabled(&self, feature: &str) -> LogError {
        if self.features.warn_disabled {
            let location = Location::caller();
            IN_DIAGNOSTIC.with(|active| {
                if !active.replace(true) {
                    self.log(Record::new(
                        Level::WARN,
                        location.file(),
                        location.line(),
                        format_args!("{} is disabled", feature),
                    ));
                    active.set(false);
                }
            });
        }
        LogError::Disabled
    }

    pub fn features(&self) -> Features {
        self.features
    }

    /// Current display toggles as configured
    pub fn display(&self) -> DisplayOptions {
        self.read().display
    }

    /// Whether any live output would accept an event at `level`
    pub fn is_enabled(&self, level: Level) -> bool {
        level >= self.read().outputs.lowest_level()
    }

    // ---- dispatch --------------------------------------------------------

    /// Dispatch one record to every qualifying output
    ///
    /// Filtered, unknown-topic and lock-contended calls produce no output
    /// and no error. Sinks run in ascending output id order with no lock
    /// held, so a sink that logs sees its nested call fully dispatched
    /// before the next sink of the outer call runs.
    pub fn log(&self, record: Record<'_>) {
        let (topic, adapter) = {
            let state = self.read();
            if record.level < state.outputs.lowest_level() {
                return;
            }
            let topic = match record.topic.filter(|_| self.features.topics) {
                Some(name) => match state.topics.find(name) {
                    Some((id, topic)) if topic.admits(record.level) => {
                        Some((id, name, topic.target()))
                    }
                    // Unknown topics fail closed
                    _ => return,
                },
                None => None,
            };
            (topic, state.lock.clone())
        };

        let Ok(guard) = LockGuard::acquire_opt(adapter.as_ref()) else {
            return;
        };
        let snapshot = self.snapshot();
        let time = snapshot.time.then(Local::now);
        drop(guard);

        let event = LogEvent::new(
            record.level,
            record.file,
            record.line,
            topic.map(|(id, name, _)| (id, name)),
            record.message,
            time,
            &snapshot.style,
        );

        let prefix_text = snapshot.prefix.map(|prefix| {
            let mut buffer = PrefixBuffer::with_capacity(self.prefix_size);
            (*prefix)(&event, &mut buffer);
            buffer.into_string()
        });
        let event = event.with_prefix(prefix_text.as_deref().filter(|text| !text.is_empty()));
        let topic_target = topic.map_or(OutputTarget::All, |(_, _, target)| target);

        let mut index = 0;
        loop {
            let Ok(guard) = LockGuard::acquire_opt(adapter.as_ref()) else {
                return;
            };
            let sink = {
                let state = self.read();
                if index >= state.outputs.len() {
                    break;
                }
                let id = OutputId(index);
                state
                    .outputs
                    .get(id)
                    .filter(|slot| {
                        record.level >= slot.level
                            && topic_target.admits(id)
                            && record.target.admits(id)
                    })
                    .map(|slot| Arc::clone(&slot.sink))
            };
            drop(guard);

            if let Some(sink) = sink {
                sink.write_event(&event);
            }
            index += 1;
        }
    }

    fn snapshot(&self) -> Snapshot {
        let state = self.read();
        let features = &self.features;
        let display = &state.display;
        Snapshot {
            style: Style {
                levels: Arc::clone(&state.levels),
                color: features.color && display.color,
                topics: features.topics && display.topics,
                source_location: features.source_location && display.source_location,
            },
            time: features.time && display.time,
            prefix: state
                .prefix
                .clone()
                .filter(|_| features.prefix && display.prefix),
        }
    }

    #[track_caller]
    pub fn log_args(&self, level: Level, message: fmt::Arguments<'_>) {
        self.log(Record::here(level, message));
    }

    #[track_caller]
    pub fn trace(&self, message: fmt::Arguments<'_>) {
        self.log_args(Level::TRACE, message);
    }

    #[track_caller]
    pub fn debug(&self, message: fmt::Arguments<'_>) {
        self.log_args(Level::DEBUG, message);
    }

    #[track_caller]
    pub fn info(&self, message: fmt::Arguments<'_>) {
        self.log_args(Level::INFO, message);
    }

    #[track_caller]
    pub fn warn(&self, message: fmt::Arguments<'_>) {
        self.log_args(Level::WARN, message);
    }

    #[track_caller]
    pub fn error(&self, message: fmt::Arguments<'_>) {
        self.log_args(Level::ERROR, message);
    }

    #[track_caller]
    pub fn fatal(&self, message: fmt::Arguments<'_>) {
        self.log_args(Level::FATAL, message);
    }

    // ---- outputs ---------------------------------------------------------

    /// Register a sink receiving events at `level` and above
    #[track_caller]
    pub fn add_output(&self, sink: impl LogSink + 'static, level: Level) -> Result<OutputId, LogError> {
        if !self.features.extra_outputs {
            return Err(self.disabled("extra outputs"));
        }
        let sink: Arc<dyn LogSink> = Arc::new(sink);
        self.update(|state| {
            check_level(state, level)?;
            state.outputs.add(sink, level)
        })
    }

    /// Register a closure as a sink
    #[track_caller]
    pub fn add_output_fn<F>(&self, callback: F, level: Level) -> Result<OutputId, LogError>
    where
        F: Fn(&LogEvent<'_>) + Send + Sync + 'static,
    {
        self.add_output(callback, level)
    }

    /// Register an open writer; see [`FileSink`]
    #[track_caller]
    pub fn add_file<W>(&self, writer: W, level: Level) -> Result<OutputId, LogError>
    where
        W: Write + Send + 'static,
    {
        self.add_output(FileSink::new(writer), level)
    }

    /// Remove an output; its id is reused by a later add
    pub fn remove_output(&self, id: OutputId) -> Result<(), LogError> {
        self.update(|state| state.outputs.remove(id))
    }

    pub fn set_output_level(&self, id: OutputId, level: Level) -> Result<(), LogError> {
        self.update(|state| {
            check_level(state, level)?;
            state.outputs.set_level(id, level)
        })
    }

    /// Set the same minimum level on every live output, console included
    pub fn set_output_level_all(&self, level: Level) -> Result<(), LogError> {
        self.update(|state| {
            check_level(state, level)?;
            state.outputs.set_level_all(level);
            Ok(())
        })
    }

    pub fn output_level(&self, id: OutputId) -> Result<Level, LogError> {
        self.read()
            .outputs
            .get(id)
            .map(|slot| slot.level)
            .ok_or(LogError::NotFound)
    }

    // ---- topics ----------------------------------------------------------

    #[track_caller]
    fn topics_available(&self) -> Result<(), LogError> {
        if self.features.topics {
            Ok(())
        } else {
            Err(self.disabled("topics"))
        }
    }

    /// Add a topic, or return the id of the existing topic with this name
    ///
    /// `target` restricts the topic to one output. An existing topic keeps
    /// its current settings.
    #[track_caller]
    pub fn add_topic(&self, name: &str, target: OutputTarget, enabled: bool) -> Result<TopicId, LogError> {
        self.topics_available()?;
        self.update(|state| state.topics.add(name, target, enabled))
    }

    #[track_caller]
    pub fn remove_topic(&self, name: &str) -> Result<(), LogError> {
        self.topics_available()?;
        self.update(|state| state.topics.remove(name))
    }

    #[track_caller]
    pub fn topic_id(&self, name: &str) -> Result<TopicId, LogError> {
        self.topics_available()?;
        self.read().topics.get_id(name)
    }

    /// Snapshot of a topic's settings
    #[track_caller]
    pub fn topic(&self, name: &str) -> Result<Topic, LogError> {
        self.topics_available()?;
        let state = self.read();
        let id = state.topics.get_id(name)?;
        state.topics.get(id).cloned().ok_or(LogError::NotFound)
    }

    #[track_caller]
    pub fn enable_topic(&self, name: &str) -> Result<(), LogError> {
        self.topics_available()?;
        self.update(|state| state.topics.set_enabled(name, true))
    }

    #[track_caller]
    pub fn disable_topic(&self, name: &str) -> Result<(), LogError> {
        self.topics_available()?;
        self.update(|state| state.topics.set_enabled(name, false))
    }

    /// Enable every existing topic; topics added later are unaffected
    #[track_caller]
    pub fn enable_all_topics(&self) -> Result<(), LogError> {
        self.topics_available()?;
        self.update(|state| {
            state.topics.set_enabled_all(true);
            Ok(())
        })
    }

    /// Disable every existing topic; topics added later are unaffected
    #[track_caller]
    pub fn disable_all_topics(&self) -> Result<(), LogError> {
        self.topics_available()?;
        self.update(|state| {
            state.topics.set_enabled_all(false);
            Ok(())
        })
    }

    #[track_caller]
    pub fn set_topic_level(&self, name: &str, level: Level) -> Result<(), LogError> {
        self.topics_available()?;
        self.update(|state| {
            check_level(state, level)?;
            state.topics.set_level(name, level)
        })
    }

    // ---- levels ----------------------------------------------------------

    /// Replace the whole level table
    ///
    /// Output and topic levels above the new `max_level` are lowered to it.
    pub fn set_levels(&self, levels: LevelDescriptor) -> Result<(), LogError> {
        levels.validate()?;
        let levels = Arc::new(levels);
        self.update(|state| {
            install_levels(state, levels);
            Ok(())
        })
    }

    /// Switch between the built-in level name tables
    #[track_caller]
    pub fn configure_levels(&self, style: LevelStyle) -> Result<(), LogError> {
        if !self.features.dynamic_config {
            return Err(self.disabled("dynamic configuration"));
        }
        self.update(|state| {
            install_levels(state, Arc::new(style.descriptor()));
            state.display.level_style = style;
            Ok(())
        })
    }

    /// Restore the default TRACE..FATAL table
    pub fn reset_levels(&self) -> Result<(), LogError> {
        self.set_levels(LevelDescriptor::default())
    }

    /// The active level table
    pub fn levels(&self) -> Arc<LevelDescriptor> {
        Arc::clone(&self.read().levels)
    }

    /// Name of `level` in the active table, `"?"` when out of range
    pub fn level_name(&self, level: u8) -> String {
        self.read().levels.name(level).to_owned()
    }

    // ---- hooks -----------------------------------------------------------

    /// Install the function producing the per-line prefix
    ///
    /// It receives a buffer of `prefix_size` bytes; longer output is cut.
    #[track_caller]
    pub fn set_prefix_fn<F>(&self, prefix: F) -> Result<(), LogError>
    where
        F: Fn(&LogEvent<'_>, &mut PrefixBuffer) + Send + Sync + 'static,
    {
        if !self.features.prefix {
            return Err(self.disabled("prefix"));
        }
        let prefix: Arc<PrefixFn> = Arc::new(prefix);
        self.update(|state| {
            state.prefix = Some(prefix);
            Ok(())
        })
    }

    #[track_caller]
    pub fn clear_prefix_fn(&self) -> Result<(), LogError> {
        if !self.features.prefix {
            return Err(self.disabled("prefix"));
        }
        self.update(|state| {
            state.prefix = None;
            Ok(())
        })
    }

    /// Register the lock adapter used around dispatch and administration
    ///
    /// Replacing or clearing the adapter does not go through the adapter
    /// itself, so a wedged lock can always be removed.
    pub fn set_lock(&self, lock: Arc<dyn LockAdapter>) {
        self.write().lock = Some(lock);
    }

    pub fn clear_lock(&self) {
        self.write().lock = None;
    }

    // ---- display toggles -------------------------------------------------

    #[track_caller]
    fn configure(&self, toggle: Toggle, enabled: bool) -> Result<(), LogError> {
        if !self.features.dynamic_config {
            return Err(self.disabled("dynamic configuration"));
        }
        if !toggle.available(&self.features) {
            return Err(self.disabled(toggle.name()));
        }
        self.update(|state| {
            *toggle.flag(&mut state.display) = enabled;
            Ok(())
        })
    }

    /// Toggle level colors on the console
    #[track_caller]
    pub fn configure_color(&self, enabled: bool) -> Result<(), LogError> {
        self.configure(Toggle::Color, enabled)
    }

    #[track_caller]
    pub fn configure_time(&self, enabled: bool) -> Result<(), LogError> {
        self.configure(Toggle::Time, enabled)
    }

    #[track_caller]
    pub fn configure_prefix(&self, enabled: bool) -> Result<(), LogError> {
        self.configure(Toggle::Prefix, enabled)
    }

    /// Toggle the `[topic]` segment; topic filtering is unaffected
    #[track_caller]
    pub fn configure_topics(&self, enabled: bool) -> Result<(), LogError> {
        self.configure(Toggle::Topics, enabled)
    }

    #[track_caller]
    pub fn configure_source_location(&self, enabled: bool) -> Result<(), LogError> {
        self.configure(Toggle::SourceLocation, enabled)
    }

    /// Drop all topics and extra outputs, clear the hooks and reset levels
    ///
    /// The console slot survives; its level is lowered to FATAL if the
    /// replaced table allowed more.
    pub fn cleanup(&self) -> Result<(), LogError> {
        self.update(|state| {
            state.outputs.clear_extra();
            state.topics.clear();
            state.prefix = None;
            state.lock = None;
            install_levels(state, Arc::new(LevelDescriptor::default()));
            state.display.level_style = LevelStyle::Default;
            Ok(())
        })
    }
}

fn install_levels(state: &mut State, levels: Arc<LevelDescriptor>) {
    let max = levels.max_level();
    state.outputs.clamp_levels(max);
    state.topics.clamp_levels(max);
    state.levels = levels;
}

fn check_level(state: &State, level: Level) -> Result<(), LogError> {
    if state.levels.contains(level) {
        Ok(())
    } else {
        Err(LogError::InvalidArgument)
    }
}
