//! Integration Tests: Topics
//!
//! Topic lifecycle and how topic filtering composes with output levels.

#[cfg(test)]
mod tests {
    use microlog::{
        log_info, log_warn, BufferSink, Level, LogConfig, LogError, Logger, OutputTarget,
    };

    fn logger() -> (Logger, BufferSink) {
        let console = BufferSink::new();
        let logger = Logger::with_console(LogConfig::default(), console.clone()).unwrap();
        (logger, console)
    }

    #[test]
    fn test_disabled_topic_then_enabled() {
        let (logger, console) = logger();
        let extra = BufferSink::new();
        logger.add_output(extra.clone(), Level::WARN).unwrap();
        logger.add_topic("net", OutputTarget::All, false).unwrap();

        log_info!(logger, topic = "net", "x");
        assert!(console.is_empty());
        assert!(extra.is_empty());

        logger.enable_topic("net").unwrap();
        log_info!(logger, topic = "net", "x");
        assert_eq!(console.len(), 1);
        assert!(console.lines()[0].contains("[net]"));
        // The WARN output does not admit INFO
        assert!(extra.is_empty());
    }

    #[test]
    fn test_never_registered_topic_reaches_nothing() {
        let (logger, console) = logger();
        let extra = BufferSink::new();
        logger.add_output(extra.clone(), Level::TRACE).unwrap();

        log_warn!(logger, topic = "ghost", "boo");
        assert!(console.is_empty());
        assert!(extra.is_empty());
    }

    #[test]
    fn test_duplicate_add_keeps_state() {
        let (logger, _console) = logger();
        let id = logger.add_topic("db", OutputTarget::All, true).unwrap();
        logger.set_topic_level("db", Level::ERROR).unwrap();
        logger.disable_topic("db").unwrap();

        assert_eq!(logger.add_topic("db", OutputTarget::All, true), Ok(id));
        let topic = logger.topic("db").unwrap();
        assert!(!topic.is_enabled());
        assert_eq!(topic.level(), Level::ERROR);
    }

    #[test]
    fn test_topic_level_filters() {
        let (logger, console) = logger();
        logger.add_topic("db", OutputTarget::All, true).unwrap();
        logger.set_topic_level("db", Level::WARN).unwrap();

        log_info!(logger, topic = "db", "slow query");
        assert!(console.is_empty());
        log_warn!(logger, topic = "db", "very slow query");
        assert_eq!(console.len(), 1);
    }

    #[test]
    fn test_bulk_enable_disable() {
        let (logger, console) = logger();
        logger.add_topic("a", OutputTarget::All, false).unwrap();
        logger.add_topic("b", OutputTarget::All, false).unwrap();

        logger.enable_all_topics().unwrap();
        log_info!(logger, topic = "a", "one");
        log_info!(logger, topic = "b", "two");
        assert_eq!(console.len(), 2);

        logger.disable_all_topics().unwrap();
        logger.add_topic("c", OutputTarget::All, true).unwrap();
        log_info!(logger, topic = "a", "three");
        log_info!(logger, topic = "c", "four");
        assert_eq!(console.len(), 3);
        assert!(console.lines()[2].contains("[c]"));
    }

    #[test]
    fn test_topic_bound_to_one_output() {
        let (logger, console) = logger();
        let audit = BufferSink::new();
        let audit_id = logger.add_output(audit.clone(), Level::TRACE).unwrap();
        logger
            .add_topic("audit", OutputTarget::Only(audit_id), true)
            .unwrap();

        log_info!(logger, topic = "audit", "user login");
        assert!(console.is_empty());
        assert_eq!(audit.len(), 1);

        // Per-call target and topic binding must both admit the output
        log_info!(logger, topic = "audit", output = microlog::OutputId::CONSOLE, "nowhere");
        assert!(console.is_empty());
        assert_eq!(audit.len(), 1);
    }

    #[test]
    fn test_remove_topic() {
        let (logger, console) = logger();
        logger.add_topic("tmp", OutputTarget::All, true).unwrap();
        logger.remove_topic("tmp").unwrap();
        assert_eq!(logger.remove_topic("tmp"), Err(LogError::NotFound));
        assert_eq!(logger.topic_id("tmp"), Err(LogError::NotFound));

        log_info!(logger, topic = "tmp", "gone");
        assert!(console.is_empty());
    }

    #[test]
    fn test_name_validation() {
        let (logger, _console) = logger();
        assert_eq!(
            logger.add_topic("", OutputTarget::All, true),
            Err(LogError::InvalidArgument)
        );
        assert_eq!(logger.remove_topic(""), Err(LogError::InvalidArgument));
        assert_eq!(logger.enable_topic("nope"), Err(LogError::NotFound));
        assert_eq!(
            logger.set_topic_level("nope", Level::INFO),
            Err(LogError::NotFound)
        );
    }

    #[test]
    fn test_fixed_topic_capacity() {
        let console = BufferSink::new();
        let logger = Logger::with_console(LogConfig::embedded(2, 1), console).unwrap();
        logger.add_topic("only", OutputTarget::All, true).unwrap();
        assert_eq!(
            logger.add_topic("second", OutputTarget::All, true),
            Err(LogError::Full)
        );
    }
}
