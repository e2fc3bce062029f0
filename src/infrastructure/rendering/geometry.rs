use crate::domain::chart::{ChartLayoutService, ChartTheme, Color, Figure, LegendEntry, MarkerShape, Viewport};
use crate::time_utils::format_time_label;

/// Series at least this long are projected on the rayon pool
pub const PARALLEL_THRESHOLD: usize = 4096;

const LEGEND_ROW_HEIGHT: f64 = 18.0;
const LEGEND_SWATCH: f64 = 20.0;
const LEGEND_PADDING: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_css(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// One drawing primitive in pixel space
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect { x: f64, y: f64, width: f64, height: f64, color: Color },
    StrokeRect { x: f64, y: f64, width: f64, height: f64, color: Color, line_width: f64 },
    Line { from: (f64, f64), to: (f64, f64), color: Color, line_width: f64 },
    Polyline { points: Vec<(f64, f64)>, color: Color, line_width: f64 },
    Marker { shape: MarkerShape, center: (f64, f64), size: f64, color: Color },
    /// `vertical` text is rotated a quarter turn counter-clockwise around (x, y)
    Text { text: String, x: f64, y: f64, font: String, color: Color, align: TextAlign, vertical: bool },
}

/// Pixel-space layout of a figure, independent of any drawing surface
#[derive(Debug, Clone)]
pub struct FigureGeometry {
    pub viewport: Viewport,
    pub commands: Vec<DrawCommand>,
    /// Index of the first legend command, `commands.len()` without a legend
    pub legend_start: usize,
}

impl FigureGeometry {
    pub fn build(figure: &Figure, theme: &ChartTheme) -> Self {
        let layout = ChartLayoutService::new();
        let viewport = layout.viewport_for(figure, theme);
        let mut commands = Vec::new();

        commands.push(DrawCommand::FillRect {
            x: 0.0,
            y: 0.0,
            width: figure.size.width as f64,
            height: figure.size.height as f64,
            color: theme.background,
        });

        let y_ticks = layout.nice_ticks(viewport.min_value, viewport.max_value, theme.y_ticks);
        let x_ticks = layout.even_ticks(viewport.start_time, viewport.end_time, theme.x_ticks);

        if figure.grid {
            Self::grid(&viewport, theme, &x_ticks, &y_ticks, &mut commands);
        }

        commands.push(DrawCommand::StrokeRect {
            x: viewport.left,
            y: viewport.top,
            width: viewport.width,
            height: viewport.height,
            color: theme.foreground,
            line_width: 1.0,
        });

        if figure.data_bounds().is_some() {
            Self::tick_labels(&viewport, theme, &x_ticks, &y_ticks, &mut commands);
        }

        for line in &figure.lines {
            let points = project_points(&viewport, &line.points);
            if points.len() > 1 {
                commands.push(DrawCommand::Polyline { points, color: line.color, line_width: line.width });
            }
        }

        for scatter in &figure.scatters {
            for center in project_points(&viewport, &scatter.points) {
                commands.push(DrawCommand::Marker {
                    shape: scatter.shape,
                    center,
                    size: scatter.size,
                    color: scatter.color,
                });
            }
        }

        Self::labels(figure, &viewport, theme, &mut commands);

        let legend_start = commands.len();
        if figure.legend {
            Self::legend(&figure.legend_entries(), &viewport, theme, &mut commands);
        }

        Self { viewport, commands, legend_start }
    }

    fn grid(viewport: &Viewport, theme: &ChartTheme, x_ticks: &[f64], y_ticks: &[f64], out: &mut Vec<DrawCommand>) {
        let bottom = viewport.top + viewport.height;
        let right = viewport.left + viewport.width;
        for &t in x_ticks {
            let x = viewport.time_to_x(t);
            out.push(DrawCommand::Line {
                from: (x, viewport.top),
                to: (x, bottom),
                color: theme.grid_color,
                line_width: 1.0,
            });
        }
        for &v in y_ticks {
            let y = viewport.value_to_y(v);
            out.push(DrawCommand::Line {
                from: (viewport.left, y),
                to: (right, y),
                color: theme.grid_color,
                line_width: 1.0,
            });
        }
    }

    fn tick_labels(
        viewport: &Viewport,
        theme: &ChartTheme,
        x_ticks: &[f64],
        y_ticks: &[f64],
        out: &mut Vec<DrawCommand>,
    ) {
        let font = theme.font(theme.tick_font_px);
        let bottom = viewport.top + viewport.height;
        let span = viewport.time_range() as i64;

        for &t in x_ticks {
            out.push(DrawCommand::Text {
                text: format_time_label(t as i64, span),
                x: viewport.time_to_x(t),
                y: bottom + theme.tick_font_px + 6.0,
                font: font.clone(),
                color: theme.foreground,
                align: TextAlign::Center,
                vertical: false,
            });
        }
        for &v in y_ticks {
            out.push(DrawCommand::Text {
                text: format!("{:.2}", v),
                x: viewport.left - 6.0,
                y: viewport.value_to_y(v) + theme.tick_font_px / 3.0,
                font: font.clone(),
                color: theme.foreground,
                align: TextAlign::Right,
                vertical: false,
            });
        }
    }

    fn labels(figure: &Figure, viewport: &Viewport, theme: &ChartTheme, out: &mut Vec<DrawCommand>) {
        let center_x = viewport.left + viewport.width / 2.0;
        if !figure.title.is_empty() {
            out.push(DrawCommand::Text {
                text: figure.title.clone(),
                x: center_x,
                y: viewport.top / 2.0 + theme.title_font_px / 2.0,
                font: theme.font(theme.title_font_px),
                color: theme.foreground,
                align: TextAlign::Center,
                vertical: false,
            });
        }
        if !figure.x_label.is_empty() {
            out.push(DrawCommand::Text {
                text: figure.x_label.clone(),
                x: center_x,
                y: figure.size.height as f64 - theme.label_font_px / 2.0,
                font: theme.font(theme.label_font_px),
                color: theme.foreground,
                align: TextAlign::Center,
                vertical: false,
            });
        }
        if !figure.y_label.is_empty() {
            out.push(DrawCommand::Text {
                text: figure.y_label.clone(),
                x: theme.label_font_px,
                y: viewport.top + viewport.height / 2.0,
                font: theme.font(theme.label_font_px),
                color: theme.foreground,
                align: TextAlign::Center,
                vertical: true,
            });
        }
    }

    /// Legend box in the upper left corner of the plot area
    fn legend(entries: &[LegendEntry], viewport: &Viewport, theme: &ChartTheme, out: &mut Vec<DrawCommand>) {
        if entries.is_empty() {
            return;
        }
        let longest = entries.iter().map(|e| e.label.chars().count()).max().unwrap_or(0) as f64;
        let width = LEGEND_PADDING * 3.0 + LEGEND_SWATCH + longest * theme.label_font_px * 0.6;
        let height = LEGEND_PADDING * 2.0 + entries.len() as f64 * LEGEND_ROW_HEIGHT;
        let x = viewport.left + LEGEND_PADDING;
        let y = viewport.top + LEGEND_PADDING;

        out.push(DrawCommand::FillRect { x, y, width, height, color: theme.background.with_alpha(0.8) });
        out.push(DrawCommand::StrokeRect { x, y, width, height, color: theme.grid_color, line_width: 1.0 });

        for (i, entry) in entries.iter().enumerate() {
            let row_y = y + LEGEND_PADDING + (i as f64 + 0.5) * LEGEND_ROW_HEIGHT;
            let swatch_x = x + LEGEND_PADDING;
            match entry.shape {
                Some(shape) => out.push(DrawCommand::Marker {
                    shape,
                    center: (swatch_x + LEGEND_SWATCH / 2.0, row_y),
                    size: theme.marker_size,
                    color: entry.color,
                }),
                None => out.push(DrawCommand::Line {
                    from: (swatch_x, row_y),
                    to: (swatch_x + LEGEND_SWATCH, row_y),
                    color: entry.color,
                    line_width: theme.line_width,
                }),
            }
            out.push(DrawCommand::Text {
                text: entry.label.clone(),
                x: swatch_x + LEGEND_SWATCH + LEGEND_PADDING,
                y: row_y + theme.label_font_px / 3.0,
                font: theme.font(theme.label_font_px),
                color: theme.foreground,
                align: TextAlign::Left,
                vertical: false,
            });
        }
    }

    /// Marker commands of one shape, legend swatches excluded
    pub fn markers(&self, shape: MarkerShape) -> Vec<(f64, f64)> {
        self.commands[..self.legend_start]
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Marker { shape: s, center, .. } if *s == shape => Some(*center),
                _ => None,
            })
            .collect()
    }

    pub fn grid_line_count(&self, grid_color: Color) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { color, .. } if *color == grid_color))
            .count()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Project finite data points into pixel space, preserving order
#[cfg(feature = "parallel")]
pub fn project_points(viewport: &Viewport, points: &[(f64, f64)]) -> Vec<(f64, f64)> {
    use rayon::prelude::*;

    if points.len() >= PARALLEL_THRESHOLD {
        return points
            .par_iter()
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .map(|&p| viewport.project(p))
            .collect();
    }
    project_sequential(viewport, points)
}

/// Project finite data points into pixel space, preserving order
#[cfg(not(feature = "parallel"))]
pub fn project_points(viewport: &Viewport, points: &[(f64, f64)]) -> Vec<(f64, f64)> {
    project_sequential(viewport, points)
}

fn project_sequential(viewport: &Viewport, points: &[(f64, f64)]) -> Vec<(f64, f64)> {
    points
        .iter()
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|&p| viewport.project(p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::{FigureSize, LineSeries, ScatterSeries};

    fn sample_figure() -> Figure {
        let mut figure = Figure::new(FigureSize::new(1000, 600))
            .with_title("Price With Buy/Sell Signals")
            .with_labels("Date", "Price")
            .with_legend(true)
            .with_grid(true);
        figure.add_line(LineSeries::new(
            "Price",
            Color::BLUE,
            1.5,
            vec![(0.0, 100.0), (60_000.0, 105.0), (120_000.0, 95.0)],
        ));
        figure.add_scatter(ScatterSeries::new("BUY", MarkerShape::TriangleUp, Color::GREEN, 6.0, vec![(0.0, 100.0)]));
        figure.add_scatter(ScatterSeries::new(
            "SELL",
            MarkerShape::TriangleDown,
            Color::RED,
            6.0,
            vec![(120_000.0, 95.0)],
        ));
        figure
    }

    #[test]
    fn markers_land_inside_plot_area() {
        let geometry = FigureGeometry::build(&sample_figure(), &ChartTheme::default());
        let buys = geometry.markers(MarkerShape::TriangleUp);
        let sells = geometry.markers(MarkerShape::TriangleDown);
        assert_eq!(buys.len(), 1);
        assert_eq!(sells.len(), 1);
        // First bar sits on the left edge, last bar on the right edge
        assert!(buys.iter().chain(&sells).all(|p| geometry.viewport.contains(*p)));
        assert_eq!(buys[0].0, geometry.viewport.left);
        assert_eq!(sells[0].0, geometry.viewport.left + geometry.viewport.width);
    }

    #[test]
    fn grid_follows_figure_flag() {
        let theme = ChartTheme::default();
        let with_grid = FigureGeometry::build(&sample_figure(), &theme);
        let without = FigureGeometry::build(&sample_figure().with_grid(false), &theme);
        assert!(with_grid.grid_line_count(theme.grid_color) > 0);
        assert_eq!(without.grid_line_count(theme.grid_color), 0);
    }

    #[test]
    fn legend_and_title_are_emitted() {
        let geometry = FigureGeometry::build(&sample_figure(), &ChartTheme::default());
        let texts = geometry.texts();
        for expected in ["Price With Buy/Sell Signals", "Date", "Price", "BUY", "SELL"] {
            assert!(texts.contains(&expected), "missing {}", expected);
        }
        let no_legend = FigureGeometry::build(&sample_figure().with_legend(false), &ChartTheme::default());
        assert!(!no_legend.texts().contains(&"BUY"));
    }

    #[test]
    fn empty_figure_has_frame_but_no_ticks() {
        let geometry = FigureGeometry::build(&Figure::new(FigureSize::default()), &ChartTheme::default());
        assert!(geometry.texts().is_empty());
        assert!(geometry.commands.iter().any(|c| matches!(c, DrawCommand::StrokeRect { .. })));
    }

    #[test]
    fn non_finite_points_are_skipped() {
        let vp = Viewport::new(0.0, 0.0, 100.0, 100.0);
        let projected = project_points(&vp, &[(0.5, 0.5), (f64::NAN, 1.0), (1.0, f64::INFINITY)]);
        assert_eq!(projected, vec![(50.0, 50.0)]);
    }
}
