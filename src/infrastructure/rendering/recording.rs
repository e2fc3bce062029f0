use super::ChartBackend;
use crate::domain::chart::Figure;
use crate::domain::errors::{AppError, RenderingResult};

/// Headless backend that keeps every presented figure
#[derive(Debug, Default)]
pub struct RecordingBackend {
    figures: Vec<Figure>,
    present_calls: usize,
    fail_with: Option<String>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend whose every `present` call fails with a rendering error
    pub fn failing(message: impl Into<String>) -> Self {
        Self { fail_with: Some(message.into()), ..Self::default() }
    }

    pub fn figures(&self) -> &[Figure] {
        &self.figures
    }

    pub fn last_figure(&self) -> Option<&Figure> {
        self.figures.last()
    }

    pub fn present_calls(&self) -> usize {
        self.present_calls
    }

    pub fn titles(&self) -> Vec<&str> {
        self.figures.iter().map(|f| f.title.as_str()).collect()
    }

    pub fn take_figures(&mut self) -> Vec<Figure> {
        std::mem::take(&mut self.figures)
    }
}

impl ChartBackend for RecordingBackend {
    fn present(&mut self, figure: &Figure) -> RenderingResult<()> {
        self.present_calls += 1;
        if let Some(message) = &self.fail_with {
            return Err(AppError::RenderingError(message.clone()));
        }
        self.figures.push(figure.clone());
        Ok(())
    }
}
