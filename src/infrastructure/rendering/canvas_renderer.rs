use super::ChartBackend;
use super::geometry::{DrawCommand, FigureGeometry};
use crate::domain::chart::{ChartTheme, Figure, MarkerShape};
use crate::domain::errors::{AppError, RenderingResult};
use crate::domain::logging::LogComponent;
use crate::{log_debug, log_warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const COMPONENT: LogComponent = LogComponent::Infrastructure("CanvasBackend");

/// What happens to a canvas once a figure is drawn on it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FigureOutput {
    /// Append the canvas to the container element
    Show,
    /// Keep a PNG data URL of the canvas instead of attaching it
    Capture,
}

/// Canvas 2D backend - one `<canvas>` element per figure
pub struct CanvasBackend {
    container_id: String,
    output: FigureOutput,
    theme: ChartTheme,
    captured: Vec<String>,
    figures_drawn: usize,
}

impl CanvasBackend {
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
            output: FigureOutput::Show,
            theme: ChartTheme::default(),
            captured: Vec::new(),
            figures_drawn: 0,
        }
    }

    pub fn with_output(mut self, output: FigureOutput) -> Self {
        self.output = output;
        self
    }

    pub fn with_theme(mut self, theme: ChartTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn set_theme(&mut self, theme: ChartTheme) {
        self.theme = theme;
    }

    pub fn set_output(&mut self, output: FigureOutput) {
        self.output = output;
    }

    pub fn output(&self) -> FigureOutput {
        self.output
    }

    pub fn figures_drawn(&self) -> usize {
        self.figures_drawn
    }

    /// Drain the PNG data URLs captured so far
    pub fn take_captured(&mut self) -> Vec<String> {
        std::mem::take(&mut self.captured)
    }

    fn create_canvas(&self, figure: &Figure) -> RenderingResult<(HtmlCanvasElement, CanvasRenderingContext2d)> {
        let document = gloo::utils::document();
        let canvas = document
            .create_element("canvas")
            .map_err(js_error("Failed to create canvas element"))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| AppError::RenderingError("Created element is not a canvas".to_string()))?;

        canvas.set_width(figure.size.width);
        canvas.set_height(figure.size.height);
        if !figure.title.is_empty() {
            canvas
                .set_attribute("data-title", &figure.title)
                .map_err(js_error("Failed to set canvas title"))?;
        }

        let context = canvas
            .get_context("2d")
            .map_err(js_error("Failed to get 2D context"))?
            .ok_or_else(|| AppError::RenderingError("2D context is not available".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| AppError::RenderingError("Failed to cast to 2D context".to_string()))?;

        Ok((canvas, context))
    }

    fn attach(&self, canvas: &HtmlCanvasElement) -> RenderingResult<()> {
        let document = gloo::utils::document();
        let attached = match document.get_element_by_id(&self.container_id) {
            Some(container) => container.append_child(canvas),
            None => {
                log_warn!(COMPONENT, "Container '{}' not found, appending to body", self.container_id);
                gloo::utils::body().append_child(canvas)
            }
        };
        attached.map(|_| ()).map_err(js_error("Failed to attach canvas"))
    }

    fn execute(context: &CanvasRenderingContext2d, command: &DrawCommand) -> Result<(), JsValue> {
        match command {
            DrawCommand::FillRect { x, y, width, height, color } => {
                context.set_fill_style_str(&color.to_css());
                context.fill_rect(*x, *y, *width, *height);
            }
            DrawCommand::StrokeRect { x, y, width, height, color, line_width } => {
                context.set_stroke_style_str(&color.to_css());
                context.set_line_width(*line_width);
                context.stroke_rect(*x, *y, *width, *height);
            }
            DrawCommand::Line { from, to, color, line_width } => {
                context.set_stroke_style_str(&color.to_css());
                context.set_line_width(*line_width);
                context.begin_path();
                context.move_to(from.0, from.1);
                context.line_to(to.0, to.1);
                context.stroke();
            }
            DrawCommand::Polyline { points, color, line_width } => {
                let Some((first, rest)) = points.split_first() else {
                    return Ok(());
                };
                context.set_stroke_style_str(&color.to_css());
                context.set_line_width(*line_width);
                context.set_line_join("round");
                context.begin_path();
                context.move_to(first.0, first.1);
                for (x, y) in rest {
                    context.line_to(*x, *y);
                }
                context.stroke();
            }
            DrawCommand::Marker { shape, center, size, color } => {
                let (x, y) = *center;
                context.set_fill_style_str(&color.to_css());
                context.begin_path();
                match shape {
                    MarkerShape::TriangleUp => {
                        context.move_to(x, y - size);
                        context.line_to(x + size, y + size);
                        context.line_to(x - size, y + size);
                        context.close_path();
                    }
                    MarkerShape::TriangleDown => {
                        context.move_to(x, y + size);
                        context.line_to(x + size, y - size);
                        context.line_to(x - size, y - size);
                        context.close_path();
                    }
                }
                context.fill();
            }
            DrawCommand::Text { text, x, y, font, color, align, vertical } => {
                context.set_fill_style_str(&color.to_css());
                context.set_font(font);
                context.set_text_align(align.as_css());
                if *vertical {
                    context.save();
                    context.translate(*x, *y)?;
                    context.rotate(-std::f64::consts::FRAC_PI_2)?;
                    context.fill_text(text, 0.0, 0.0)?;
                    context.restore();
                } else {
                    context.fill_text(text, *x, *y)?;
                }
            }
        }
        Ok(())
    }
}

impl ChartBackend for CanvasBackend {
    fn present(&mut self, figure: &Figure) -> RenderingResult<()> {
        let geometry = FigureGeometry::build(figure, &self.theme);
        let (canvas, context) = self.create_canvas(figure)?;

        for command in &geometry.commands {
            Self::execute(&context, command).map_err(js_error("Canvas draw call failed"))?;
        }

        match self.output {
            FigureOutput::Show => self.attach(&canvas)?,
            FigureOutput::Capture => {
                let url = canvas.to_data_url().map_err(js_error("Failed to capture canvas"))?;
                self.captured.push(url);
            }
        }

        self.figures_drawn += 1;
        log_debug!(
            COMPONENT,
            "Figure '{}' drawn with {} commands ({:?})",
            figure.title,
            geometry.commands.len(),
            self.output
        );
        Ok(())
    }
}

fn js_error(context: &'static str) -> impl Fn(JsValue) -> AppError {
    move |err| AppError::RenderingError(format!("{}: {:?}", context, err))
}
