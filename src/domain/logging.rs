use derive_more::Display;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError, RwLock};

/// Log levels with automatic Display implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum LogLevel {
    #[display(fmt = "TRACE")]
    Trace = 0,
    #[display(fmt = "DEBUG")]
    Debug = 1,
    #[display(fmt = "INFO")]
    Info = 2,
    #[display(fmt = "WARNING")]
    Warn = 3,
    #[display(fmt = "ERROR")]
    Error = 4,
}

/// Log components with automatic Display implementation
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum LogComponent {
    #[display(fmt = "DOM:{}", _0)]
    Domain(&'static str),
    #[display(fmt = "APP:{}", _0)]
    Application(&'static str),
    #[display(fmt = "INF:{}", _0)]
    Infrastructure(&'static str),
    #[display(fmt = "PRE:{}", _0)]
    Presentation(&'static str),
}

/// Structured log entry
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: u64,
    pub level: LogLevel,
    pub component: LogComponent,
    /// Name of the named logger the entry went through, if any
    pub logger: Option<&'static str>,
    pub message: String,
}

/// Domain abstraction for time service
pub trait TimeProvider: Send + Sync {
    fn current_timestamp(&self) -> u64;
    fn format_timestamp(&self, timestamp: u64) -> String;
}

/// Domain abstraction for structured logging
pub trait Logger: Send + Sync {
    fn log(&self, entry: LogEntry);

    /// Convenience methods with default implementations
    fn trace(&self, component: LogComponent, message: &str) {
        self.log(LogEntry::new(LogLevel::Trace, component, message));
    }

    fn debug(&self, component: LogComponent, message: &str) {
        self.log(LogEntry::new(LogLevel::Debug, component, message));
    }

    fn info(&self, component: LogComponent, message: &str) {
        self.log(LogEntry::new(LogLevel::Info, component, message));
    }

    fn warn(&self, component: LogComponent, message: &str) {
        self.log(LogEntry::new(LogLevel::Warn, component, message));
    }

    fn error(&self, component: LogComponent, message: &str) {
        self.log(LogEntry::new(LogLevel::Error, component, message));
    }
}

impl LogEntry {
    pub fn new(level: LogLevel, component: LogComponent, message: &str) -> Self {
        Self {
            timestamp: get_time_provider().current_timestamp(),
            level,
            component,
            logger: None,
            message: message.to_string(),
        }
    }

    /// Logger name if routed through a named logger, component otherwise
    pub fn source(&self) -> String {
        match self.logger {
            Some(name) => name.to_string(),
            None => self.component.to_string(),
        }
    }
}

/// A logger with a name, a level threshold and a list of handlers.
///
/// Handlers receive every entry at or above the threshold. Setup code uses
/// [`NamedLogger::add_handler_if_empty`] so that running it twice never
/// attaches a second handler.
pub struct NamedLogger {
    name: &'static str,
    min_level: RwLock<LogLevel>,
    handlers: RwLock<Vec<Arc<dyn Logger>>>,
}

impl NamedLogger {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            min_level: RwLock::new(LogLevel::Info),
            handlers: RwLock::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn level(&self) -> LogLevel {
        *self.min_level.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_level(&self, level: LogLevel) {
        *self.min_level.write().unwrap_or_else(PoisonError::into_inner) = level;
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn add_handler(&self, handler: Arc<dyn Logger>) {
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(handler);
    }

    /// Attach the handler built by `make` only if none is attached yet.
    /// Returns whether a handler was attached.
    pub fn add_handler_if_empty<F>(&self, make: F) -> bool
    where
        F: FnOnce() -> Arc<dyn Logger>,
    {
        let mut handlers = self.handlers.write().unwrap_or_else(PoisonError::into_inner);
        if !handlers.is_empty() {
            return false;
        }
        handlers.push(make());
        true
    }
}

impl Logger for NamedLogger {
    fn log(&self, mut entry: LogEntry) {
        if entry.level < self.level() {
            return;
        }
        entry.logger = Some(self.name);
        let handlers = self.handlers.read().unwrap_or_else(PoisonError::into_inner);
        for handler in handlers.iter() {
            handler.log(entry.clone());
        }
    }
}

impl std::fmt::Debug for NamedLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamedLogger")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("handlers", &self.handler_count())
            .finish()
    }
}

static NAMED_LOGGERS: Lazy<Mutex<HashMap<&'static str, Arc<NamedLogger>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Get (or create) the process-wide logger with the given name
pub fn named_logger(name: &'static str) -> Arc<NamedLogger> {
    let mut registry = NAMED_LOGGERS.lock().unwrap_or_else(PoisonError::into_inner);
    Arc::clone(
        registry
            .entry(name)
            .or_insert_with(|| Arc::new(NamedLogger::new(name))),
    )
}

/// Global services using thread-safe statics
static GLOBAL_LOGGER: OnceLock<Box<dyn Logger + Sync + Send>> = OnceLock::new();
static GLOBAL_TIME_PROVIDER: OnceLock<Box<dyn TimeProvider + Sync + Send>> = OnceLock::new();

/// Initialize global logger. Returns false if one was already installed.
pub fn init_logger(logger: Box<dyn Logger + Sync + Send>) -> bool {
    GLOBAL_LOGGER.set(logger).is_ok()
}

/// Initialize global time provider. Returns false if one was already installed.
pub fn init_time_provider(time_provider: Box<dyn TimeProvider + Sync + Send>) -> bool {
    GLOBAL_TIME_PROVIDER.set(time_provider).is_ok()
}

/// Get global logger reference
pub fn get_logger() -> &'static dyn Logger {
    GLOBAL_LOGGER
        .get()
        .map(|logger| logger.as_ref() as &dyn Logger)
        .unwrap_or(&NoOpLogger)
}

/// Get global time provider reference
pub fn get_time_provider() -> &'static dyn TimeProvider {
    GLOBAL_TIME_PROVIDER
        .get()
        .map(|provider| provider.as_ref() as &dyn TimeProvider)
        .unwrap_or(&BasicTimeProvider)
}

/// No-op logger fallback
struct NoOpLogger;
impl Logger for NoOpLogger {
    fn log(&self, _entry: LogEntry) {}
}

/// Basic time provider fallback
struct BasicTimeProvider;
impl TimeProvider for BasicTimeProvider {
    fn current_timestamp(&self) -> u64 {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        COUNTER.fetch_add(1, Ordering::SeqCst)
    }

    fn format_timestamp(&self, timestamp: u64) -> String {
        format!("{:06}", timestamp)
    }
}

/// Simplified logging macros
#[macro_export]
macro_rules! log_debug {
    ($component:expr, $($arg:tt)*) => {
        $crate::domain::logging::get_logger().debug($component, &format!($($arg)*));
    };
}

#[macro_export]
macro_rules! log_info {
    ($component:expr, $($arg:tt)*) => {
        $crate::domain::logging::get_logger().info($component, &format!($($arg)*));
    };
}

#[macro_export]
macro_rules! log_warn {
    ($component:expr, $($arg:tt)*) => {
        $crate::domain::logging::get_logger().warn($component, &format!($($arg)*));
    };
}

#[macro_export]
macro_rules! log_error {
    ($component:expr, $($arg:tt)*) => {
        $crate::domain::logging::get_logger().error($component, &format!($($arg)*));
    };
}
