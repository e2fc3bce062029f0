use backtest_visuals::domain::logging::{LogComponent, LogLevel, Logger, named_logger};
use backtest_visuals::infrastructure::logging::{MemoryLogger, VISUALS_LOGGER, setup_visuals_logger};
use std::sync::Arc;

#[test]
fn repeated_setup_keeps_a_single_handler() {
    let first = setup_visuals_logger();
    let second = setup_visuals_logger();
    let third = setup_visuals_logger();

    assert!(Arc::ptr_eq(&first, &third));
    assert_eq!(second.name(), VISUALS_LOGGER);
    assert_eq!(third.handler_count(), 1);
}

#[test]
fn named_logger_filters_by_level_and_tags_entries() {
    let logger = named_logger("Visuals.test");
    let sink = Arc::new(MemoryLogger::new());
    logger.add_handler(sink.clone());

    logger.debug(LogComponent::Application("Test"), "hidden");
    logger.info(LogComponent::Application("Test"), "shown");
    logger.warn(LogComponent::Application("Test"), "also shown");

    let entries = sink.entries();
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|e| e.logger == Some("Visuals.test")));
    assert_eq!(entries[1].level, LogLevel::Warn);

    logger.set_level(LogLevel::Debug);
    logger.debug(LogComponent::Application("Test"), "now visible");
    assert_eq!(sink.count(LogLevel::Debug), 1);
}

#[test]
fn add_handler_if_empty_respects_existing_handlers() {
    let logger = named_logger("Visuals.idempotent");
    let sink = Arc::new(MemoryLogger::new());
    assert!(logger.add_handler_if_empty(|| sink.clone()));
    assert!(!logger.add_handler_if_empty(|| Arc::new(MemoryLogger::new())));
    assert_eq!(logger.handler_count(), 1);
}
