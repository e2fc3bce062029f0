use wasm_bindgen::prelude::*;

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
pub mod time_utils;

pub use application::ChartRenderer;
pub use infrastructure::rendering::{CanvasBackend, ChartBackend, RecordingBackend};
pub use presentation::VisualsApi;

use domain::logging::{LogComponent, get_logger};
use infrastructure::logging::{ChronoTimeProvider, ConsoleLogger, setup_visuals_logger};

/// Module start: panic hook, wall-clock log times, console logging
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();
    domain::logging::init_time_provider(Box::new(ChronoTimeProvider));
    domain::logging::init_logger(Box::new(ConsoleLogger::new_development()));
    setup_visuals_logger();

    get_logger().info(LogComponent::Presentation("Initialize"), "Backtest visuals initialized");
}
