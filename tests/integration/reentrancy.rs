//! Integration Tests: Reentrancy and Locking
//!
//! Sinks and the prefix function may log again. Nested calls must finish
//! their own fan-out before the outer call moves to its next output, and
//! must not deadlock a non-recursive lock adapter.

#[cfg(test)]
mod tests {
    use microlog::{
        log_info, log_warn, BlockingLock, BufferSink, Level, LockAdapter, LogConfig, LogEvent,
        Logger, OutputId, TryLock,
    };
    use std::fmt::Write as _;
    use std::sync::{Arc, Mutex, OnceLock};
    use std::thread;

    type Journal = Arc<Mutex<Vec<String>>>;

    fn recorder(journal: &Journal, name: &'static str) -> impl Fn(&LogEvent<'_>) + Send + Sync {
        let journal = Arc::clone(journal);
        move |event: &LogEvent<'_>| {
            journal
                .lock()
                .unwrap()
                .push(format!("{}:{}", name, event.message()));
        }
    }

    fn locked_logger(journal: &Journal) -> Arc<Logger> {
        let logger = Logger::with_console(LogConfig::default(), recorder(journal, "console"))
            .unwrap();
        logger.set_lock(Arc::new(BlockingLock::new()));
        Arc::new(logger)
    }

    #[test]
    fn test_nested_call_completes_depth_first() {
        let journal: Journal = Arc::default();
        let logger = locked_logger(&journal);

        let inner = Arc::downgrade(&logger);
        let record = recorder(&journal, "relay");
        logger
            .add_output_fn(
                move |event| {
                    record(event);
                    if event.message().to_string() == "outer" {
                        if let Some(logger) = inner.upgrade() {
                            log_warn!(logger, "nested");
                        }
                    }
                },
                Level::TRACE,
            )
            .unwrap();
        logger
            .add_output_fn(recorder(&journal, "tail"), Level::TRACE)
            .unwrap();

        log_info!(logger, "outer");

        assert_eq!(
            *journal.lock().unwrap(),
            vec![
                "console:outer",
                "relay:outer",
                "console:nested",
                "relay:nested",
                "tail:nested",
                "tail:outer",
            ]
        );
    }

    #[test]
    fn test_prefix_function_may_log() {
        let journal: Journal = Arc::default();
        let logger = locked_logger(&journal);

        let inner = Arc::downgrade(&logger);
        logger
            .set_prefix_fn(move |event, buffer| {
                let _ = write!(buffer, "P");
                if event.message().to_string() == "outer" {
                    if let Some(logger) = inner.upgrade() {
                        log_info!(logger, "from prefix");
                    }
                }
            })
            .unwrap();

        log_info!(logger, "outer");
        assert_eq!(
            *journal.lock().unwrap(),
            vec!["console:from prefix", "console:outer"]
        );
    }

    #[test]
    fn test_slot_removed_mid_fan_out_is_skipped() {
        let journal: Journal = Arc::default();
        let logger = locked_logger(&journal);

        let inner = Arc::downgrade(&logger);
        let target: Arc<OnceLock<OutputId>> = Arc::default();
        let record = recorder(&journal, "remover");
        let remove = Arc::clone(&target);
        logger
            .add_output_fn(
                move |event| {
                    record(event);
                    if let (Some(logger), Some(id)) = (inner.upgrade(), remove.get()) {
                        let _ = logger.remove_output(*id);
                    }
                },
                Level::TRACE,
            )
            .unwrap();
        let victim = logger
            .add_output_fn(recorder(&journal, "victim"), Level::TRACE)
            .unwrap();
        assert_eq!(victim.index(), 2);
        target.set(victim).unwrap();

        log_info!(logger, "only once");
        assert_eq!(
            *journal.lock().unwrap(),
            vec!["console:only once", "remover:only once"]
        );
        assert!(logger.output_level(victim).is_err());
    }

    #[test]
    fn test_contended_try_lock_drops_events() {
        let console = BufferSink::new();
        let logger = Logger::with_console(LogConfig::default(), console.clone()).unwrap();
        let lock = Arc::new(TryLock::new());
        logger.set_lock(lock.clone());

        lock.lock(true).unwrap();
        log_info!(logger, "dropped");
        assert!(console.is_empty());
        assert!(lock.is_held());

        lock.lock(false).unwrap();
        log_info!(logger, "kept");
        assert_eq!(console.len(), 1);
        assert!(!lock.is_held());
    }

    #[test]
    #[cfg_attr(tarpaulin, ignore)]
    fn test_concurrent_logging_with_blocking_lock() {
        const THREADS: usize = 4;
        const PER_THREAD: usize = 250;

        let console = BufferSink::new();
        let logger = Arc::new(Logger::with_console(LogConfig::default(), console.clone()).unwrap());
        logger.set_lock(Arc::new(BlockingLock::new()));
        let extra = BufferSink::new();
        logger.add_output(extra.clone(), Level::INFO).unwrap();

        let handles: Vec<_> = (0..THREADS)
            .map(|worker| {
                let logger = Arc::clone(&logger);
                thread::spawn(move || {
                    for i in 0..PER_THREAD {
                        log_info!(logger, "worker {} message {}", worker, i);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(console.len(), THREADS * PER_THREAD);
        assert_eq!(extra.len(), THREADS * PER_THREAD);
    }
}
