use crate::domain::logging::{LogEntry, LogLevel, Logger, NamedLogger, TimeProvider, get_time_provider, named_logger};
use crate::time_utils::format_log_time;
use std::sync::{Arc, Mutex, PoisonError};

/// Name of the logger the chart renderer writes to
pub const VISUALS_LOGGER: &str = "Visuals";

/// Get the shared "Visuals" logger, attaching a console handler on first use.
///
/// Safe to call any number of times: the handler is only attached while the
/// logger has none, so output is never duplicated.
pub fn setup_visuals_logger() -> Arc<NamedLogger> {
    let logger = named_logger(VISUALS_LOGGER);
    logger.add_handler_if_empty(|| Arc::new(ConsoleLogger::new_production()));
    logger
}

/// Console logger: browser console on wasm, stderr elsewhere
pub struct ConsoleLogger {
    min_level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    pub fn new_production() -> Self {
        Self::new(LogLevel::Info)
    }

    pub fn new_development() -> Self {
        Self::new(LogLevel::Debug)
    }

    /// `time - name - LEVEL - message`
    pub fn format_log_entry(entry: &LogEntry) -> String {
        let time = get_time_provider().format_timestamp(entry.timestamp);
        format!("{} - {} - {} - {}", time, entry.source(), entry.level, entry.message)
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, entry: LogEntry) {
        if entry.level < self.min_level {
            return;
        }
        let formatted = Self::format_log_entry(&entry);

        #[cfg(target_arch = "wasm32")]
        match entry.level {
            LogLevel::Trace | LogLevel::Debug => web_sys::console::debug_1(&formatted.into()),
            LogLevel::Info => web_sys::console::info_1(&formatted.into()),
            LogLevel::Warn => web_sys::console::warn_1(&formatted.into()),
            LogLevel::Error => web_sys::console::error_1(&formatted.into()),
        }

        #[cfg(not(target_arch = "wasm32"))]
        eprintln!("{}", formatted);
    }
}

/// Keeps every entry in memory; for embedding hosts and tests
#[derive(Default)]
pub struct MemoryLogger {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.entries().into_iter().map(|e| e.message).collect()
    }

    pub fn count(&self, level: LogLevel) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|e| e.level == level)
            .count()
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl Logger for MemoryLogger {
    fn log(&self, entry: LogEntry) {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).push(entry);
    }
}

/// Wall-clock time provider backed by chrono (uses `Date` in the browser)
pub struct ChronoTimeProvider;

impl TimeProvider for ChronoTimeProvider {
    fn current_timestamp(&self) -> u64 {
        chrono::Utc::now().timestamp_millis().max(0) as u64
    }

    fn format_timestamp(&self, timestamp: u64) -> String {
        format_log_time(timestamp as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::logging::LogComponent;

    #[test]
    fn setup_is_idempotent() {
        let first = setup_visuals_logger();
        let second = setup_visuals_logger();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.handler_count(), 1);
        assert_eq!(second.level(), LogLevel::Info);
    }

    #[test]
    fn format_uses_logger_name_and_level() {
        let mut entry = LogEntry::new(LogLevel::Warn, LogComponent::Application("ChartRenderer"), "careful");
        entry.logger = Some(VISUALS_LOGGER);
        let line = ConsoleLogger::format_log_entry(&entry);
        assert!(line.ends_with(" - Visuals - WARNING - careful"), "{}", line);
    }

    #[test]
    fn memory_logger_counts_levels() {
        let logger = MemoryLogger::new();
        logger.info(LogComponent::Domain("Test"), "a");
        logger.warn(LogComponent::Domain("Test"), "b");
        logger.warn(LogComponent::Domain("Test"), "c");
        assert_eq!(logger.count(LogLevel::Warn), 2);
        assert_eq!(logger.messages(), vec!["a", "b", "c"]);
        logger.clear();
        assert!(logger.entries().is_empty());
    }
}
