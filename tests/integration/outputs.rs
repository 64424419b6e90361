//! Integration Tests: Outputs
//!
//! Output registration against real files and the slot id lifecycle.

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use microlog::{log_debug, log_info, BufferSink, Level, LogConfig, LogError, Logger, OutputId};
    use std::fs;
    use std::sync::{Arc, Mutex};

    fn logger() -> (Logger, BufferSink) {
        let console = BufferSink::new();
        let logger = Logger::with_console(LogConfig::default(), console.clone()).unwrap();
        (logger, console)
    }

    #[test]
    fn test_file_output() -> Result<()> {
        let (logger, _console) = logger();
        let file = tempfile::NamedTempFile::new()?;
        logger.add_file(file.reopen()?, Level::INFO)?;
        logger.configure_time(true)?;

        log_debug!(logger, "not written");
        log_info!(logger, "written {}", 1);
        log_info!(logger, "written {}", 2);

        let content = fs::read_to_string(file.path())?;
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("written 1"));
        assert!(lines[1].ends_with("written 2"));
        // Files get the full date: "YYYY-MM-DD HH:MM:SS INFO ..."
        assert_eq!(&lines[0][4..5], "-");
        assert_eq!(&lines[0][19..25], " INFO ");
        assert!(!content.contains('\x1b'));
        Ok(())
    }

    #[test]
    fn test_callback_output_sees_event_fields() {
        let (logger, _console) = logger();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let captured = Arc::clone(&seen);
        logger
            .add_output_fn(
                move |event| {
                    captured.lock().unwrap().push((
                        event.level(),
                        event.line(),
                        event.message().to_string(),
                    ));
                },
                Level::TRACE,
            )
            .unwrap();

        let line = line!() + 1;
        log_info!(logger, "value={}", 7);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![(Level::INFO, line, "value=7".to_string())]
        );
    }

    #[test]
    fn test_console_cannot_be_removed() {
        let (logger, console) = logger();
        assert_eq!(logger.remove_output(OutputId::CONSOLE), Err(LogError::Failed));
        log_info!(logger, "still here");
        assert_eq!(console.len(), 1);
    }

    #[test]
    fn test_remove_once_then_not_found() {
        let (logger, _console) = logger();
        let extra = BufferSink::new();
        let id = logger.add_output(extra.clone(), Level::TRACE).unwrap();

        assert_eq!(logger.remove_output(id), Ok(()));
        assert_eq!(logger.remove_output(id), Err(LogError::NotFound));
        assert_eq!(
            logger.set_output_level(id, Level::INFO),
            Err(LogError::NotFound)
        );

        log_info!(logger, "after removal");
        assert!(extra.is_empty());

        // The id comes back on the next add
        assert_eq!(logger.add_output(BufferSink::new(), Level::INFO), Ok(id));
    }

    #[test]
    fn test_ids_stay_stable_across_removal() {
        let (logger, _console) = logger();
        let first = BufferSink::new();
        let second = BufferSink::new();
        let first_id = logger.add_output(first.clone(), Level::TRACE).unwrap();
        let second_id = logger.add_output(second.clone(), Level::TRACE).unwrap();

        logger.remove_output(first_id).unwrap();
        logger.set_output_level(second_id, Level::ERROR).unwrap();
        assert_eq!(logger.output_level(second_id), Ok(Level::ERROR));

        log_info!(logger, "x");
        assert!(first.is_empty());
        assert!(second.is_empty());
    }

    #[test]
    fn test_fixed_capacity() {
        let logger = Logger::with_console(LogConfig::embedded(2, 1), BufferSink::new()).unwrap();
        let id = logger.add_output(BufferSink::new(), Level::INFO).unwrap();
        assert_eq!(
            logger.add_output(BufferSink::new(), Level::INFO),
            Err(LogError::Full)
        );
        assert_eq!(
            logger.set_output_level(OutputId::CONSOLE, Level::LEVEL_7),
            Err(LogError::InvalidArgument)
        );
        logger.remove_output(id).unwrap();
        assert!(logger.add_output(BufferSink::new(), Level::INFO).is_ok());
    }
}
