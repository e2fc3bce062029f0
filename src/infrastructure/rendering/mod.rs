pub mod canvas_renderer;
pub mod geometry;
pub mod recording;

pub use canvas_renderer::{CanvasBackend, FigureOutput};
pub use geometry::{DrawCommand, FigureGeometry, TextAlign};
pub use recording::RecordingBackend;

use crate::domain::chart::Figure;
use crate::domain::errors::RenderingResult;

/// Anything that can turn a finished figure into pixels or a record of it.
///
/// Called exactly once per figure; the figure is discarded afterwards.
pub trait ChartBackend {
    fn present(&mut self, figure: &Figure) -> RenderingResult<()>;
}

impl<B: ChartBackend + ?Sized> ChartBackend for &mut B {
    fn present(&mut self, figure: &Figure) -> RenderingResult<()> {
        (**self).present(figure)
    }
}

impl<B: ChartBackend + ?Sized> ChartBackend for Box<B> {
    fn present(&mut self, figure: &Figure) -> RenderingResult<()> {
        (**self).present(figure)
    }
}
