pub mod logging;
pub mod rendering;

pub use logging::{ChronoTimeProvider, ConsoleLogger, MemoryLogger, setup_visuals_logger};
