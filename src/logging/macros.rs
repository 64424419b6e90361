// SPDX-License-Identifier: Apache-2.0 OR MIT
// Logging macros capturing the call site

/// Log at an explicit level
///
/// Accepts an optional `topic = <name>` and/or `output = <OutputId>`
/// before the format string.
///
/// # Examples
/// ```
/// use microlog::{log_at, Level, LogConfig, Logger};
///
/// let logger = Logger::new(LogConfig::default()).unwrap();
/// log_at!(logger, Level::WARN, "queue at {}%", 93);
/// log_at!(logger, Level::INFO, topic = "net", "link up");
/// ```
#[macro_export]
macro_rules! log_at {
    ($logger:expr, $level:expr, topic = $topic:expr, output = $output:expr, $($arg:tt)+) => {
        $logger.log(
            $crate::logging::Record::new($level, file!(), line!(), format_args!($($arg)+))
                .topic($topic)
                .output($output),
        )
    };
    ($logger:expr, $level:expr, topic = $topic:expr, $($arg:tt)+) => {
        $logger.log(
            $crate::logging::Record::new($level, file!(), line!(), format_args!($($arg)+))
                .topic($topic),
        )
    };
    ($logger:expr, $level:expr, output = $output:expr, $($arg:tt)+) => {
        $logger.log(
            $crate::logging::Record::new($level, file!(), line!(), format_args!($($arg)+))
                .output($output),
        )
    };
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($crate::logging::Record::new(
            $level,
            file!(),
            line!(),
            format_args!($($arg)+),
        ))
    };
}

/// Log a message with trace level
///
/// # Examples
/// ```ignore
/// log_trace!(logger, "entering poll loop");
/// ```
#[macro_export]
macro_rules! log_trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::logging::Level::TRACE, $($arg)+)
    };
}

/// Log a message with debug level
///
/// # Examples
/// ```ignore
/// log_debug!(logger, topic = "net", "rx {} bytes", len);
/// ```
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::logging::Level::DEBUG, $($arg)+)
    };
}

/// Log a message with info level
///
/// # Examples
/// ```ignore
/// log_info!(logger, "listening on {}", addr);
/// ```
#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::logging::Level::INFO, $($arg)+)
    };
}

/// Log a message with warn level
///
/// # Examples
/// ```ignore
/// log_warn!(logger, output = file_id, "disk at {}%", 91);
/// ```
#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::logging::Level::WARN, $($arg)+)
    };
}

/// Log a message with error level
///
/// # Examples
/// ```ignore
/// log_error!(logger, "failed to bind socket: {}", err);
/// ```
#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::logging::Level::ERROR, $($arg)+)
    };
}

/// Log a message with fatal level
///
/// # Examples
/// ```ignore
/// log_fatal!(logger, "watchdog expired");
/// ```
#[macro_export]
macro_rules! log_fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::logging::Level::FATAL, $($arg)+)
    };
}
