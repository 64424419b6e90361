// SPDX-License-Identifier: Apache-2.0 OR MIT
// Process-wide default logger

use super::Logger;
use crate::config::{ConfigError, LogConfig};
use std::sync::OnceLock;

static GLOBAL: OnceLock<Logger> = OnceLock::new();

/// The process-wide logger, created with the default configuration on
/// first use unless [`init`] ran earlier
pub fn global() -> &'static Logger {
    GLOBAL.get_or_init(Logger::default)
}

/// Create the process-wide logger from `config`
///
/// Fails if the configuration is invalid or the global logger already
/// exists (including implicit creation through [`global`]).
pub fn init(config: LogConfig) -> Result<&'static Logger, ConfigError> {
    let logger = Logger::new(config)?;
    GLOBAL
        .set(logger)
        .map_err(|_| ConfigError::AlreadyInitialized)?;
    Ok(global())
}
