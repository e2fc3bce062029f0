pub mod chart_service;
pub mod coordinator;

pub use chart_service::ChartRenderer;
