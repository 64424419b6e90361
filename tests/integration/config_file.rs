//! Integration Tests: Configuration Files
//!
//! Loading a JSON5 configuration from disk and building a logger from it.

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use microlog::logging::syslog::{self, SyslogLevel, SyslogStyle};
    use microlog::{
        log_at, log_info, BufferSink, ConfigError, Level, LogConfig, LogError, Logger,
        OutputTarget,
    };
    use std::io::Write;

    #[test]
    fn test_load_and_build() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(
            file,
            r#"{{
                // field device profile
                console_level: 2,
                max_outputs: 3,
                max_topics: 4,
                features: {{ dynamic_config: false, warn_disabled: false }},
                display: {{ source_location: false }},
            }}"#
        )?;

        let config = LogConfig::load_from_file(file.path())?;
        assert_eq!(config.console_level, Level::INFO);

        let console = BufferSink::new();
        let logger = Logger::with_console(config, console.clone())?;
        log_at!(logger, Level::DEBUG, "hidden");
        log_info!(logger, "shown");
        assert_eq!(console.lines(), vec!["INFO shown".to_string()]);

        assert_eq!(logger.configure_time(true), Err(LogError::Disabled));
        assert!(console.len() == 1);
        Ok(())
    }

    #[test]
    fn test_save_then_load() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("microlog.json5");
        let config = LogConfig {
            prefix_size: 24,
            ..LogConfig::embedded(8, 16)
        };
        config.save_to_file(&path)?;
        assert_eq!(LogConfig::load_from_file(&path)?, config);
        Ok(())
    }

    #[test]
    fn test_missing_file() {
        let result = LogConfig::load_from_file(std::path::Path::new("/nonexistent/microlog.json5"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_invalid_config_rejected_by_logger() {
        let config = LogConfig {
            prefix_size: 0,
            ..LogConfig::default()
        };
        assert_eq!(
            Logger::new(config).err(),
            Some(ConfigError::ZeroPrefixSize)
        );
    }

    #[test]
    fn test_syslog_levels_with_topics() -> Result<()> {
        let console = BufferSink::new();
        let logger = Logger::with_console(LogConfig::default(), console.clone())?;
        logger.configure_source_location(false)?;
        syslog::enable(&logger, SyslogStyle::Long)?;
        logger.add_topic("net", OutputTarget::All, true)?;

        log_at!(logger, SyslogLevel::NOTICE, topic = "net", "peer up");
        log_at!(logger, SyslogLevel::EMERG, "power lost");
        assert_eq!(
            console.lines(),
            vec!["NOTICE [net] peer up".to_string(), "EMERG  power lost".to_string()]
        );

        syslog::disable(&logger)?;
        assert!(!syslog::is_active(&logger));
        log_at!(logger, SyslogLevel::EMERG, "unnamed");
        assert_eq!(console.lines()[2], "? unnamed");
        Ok(())
    }
}
