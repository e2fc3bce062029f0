use super::value_objects::{Color, FigureSize, MarkerShape};
use serde::{Deserialize, Serialize};

/// A labelled polyline in data coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSeries {
    pub label: String,
    pub color: Color,
    pub width: f64,
    pub points: Vec<(f64, f64)>,
}

impl LineSeries {
    pub fn new(label: impl Into<String>, color: Color, width: f64, points: Vec<(f64, f64)>) -> Self {
        Self { label: label.into(), color, width, points }
    }
}

/// A labelled group of markers in data coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterSeries {
    pub label: String,
    pub shape: MarkerShape,
    pub color: Color,
    /// Marker half-size in pixels
    pub size: f64,
    pub points: Vec<(f64, f64)>,
}

impl ScatterSeries {
    pub fn new(
        label: impl Into<String>,
        shape: MarkerShape,
        color: Color,
        size: f64,
        points: Vec<(f64, f64)>,
    ) -> Self {
        Self { label: label.into(), shape, color, size, points }
    }
}

/// Domain entity - one chart, built per render call and handed to a backend.
///
/// x values are epoch milliseconds, y values are prices or portfolio values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub size: FigureSize,
    pub lines: Vec<LineSeries>,
    pub scatters: Vec<ScatterSeries>,
    pub legend: bool,
    pub grid: bool,
}

impl Figure {
    pub fn new(size: FigureSize) -> Self {
        Self {
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
            size,
            lines: Vec::new(),
            scatters: Vec::new(),
            legend: false,
            grid: false,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_labels(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }

    pub fn with_legend(mut self, legend: bool) -> Self {
        self.legend = legend;
        self
    }

    pub fn with_grid(mut self, grid: bool) -> Self {
        self.grid = grid;
        self
    }

    pub fn add_line(&mut self, line: LineSeries) {
        self.lines.push(line);
    }

    /// Empty scatter groups are dropped so they never show up in the legend
    pub fn add_scatter(&mut self, scatter: ScatterSeries) {
        if !scatter.points.is_empty() {
            self.scatters.push(scatter);
        }
    }

    pub fn marker_count(&self, shape: MarkerShape) -> usize {
        self.scatters
            .iter()
            .filter(|s| s.shape == shape)
            .map(|s| s.points.len())
            .sum()
    }

    /// All marker coordinates of one shape, in insertion order
    pub fn markers(&self, shape: MarkerShape) -> Vec<(f64, f64)> {
        self.scatters
            .iter()
            .filter(|s| s.shape == shape)
            .flat_map(|s| s.points.iter().copied())
            .collect()
    }

    /// (min_x, max_x, min_y, max_y) over every line and marker
    pub fn data_bounds(&self) -> Option<(f64, f64, f64, f64)> {
        self.lines
            .iter()
            .flat_map(|l| l.points.iter())
            .chain(self.scatters.iter().flat_map(|s| s.points.iter()))
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .fold(None, |acc, &(x, y)| match acc {
                None => Some((x, x, y, y)),
                Some((min_x, max_x, min_y, max_y)) => {
                    Some((min_x.min(x), max_x.max(x), min_y.min(y), max_y.max(y)))
                }
            })
    }

    /// Legend entries in draw order: lines first, then marker groups
    pub fn legend_entries(&self) -> Vec<LegendEntry> {
        let lines = self.lines.iter().filter(|l| !l.label.is_empty()).map(|l| LegendEntry {
            label: l.label.clone(),
            color: l.color,
            shape: None,
        });
        let markers = self.scatters.iter().filter(|s| !s.label.is_empty()).map(|s| LegendEntry {
            label: s.label.clone(),
            color: s.color,
            shape: Some(s.shape),
        });
        lines.chain(markers).collect()
    }
}

/// One legend row; `shape` is `None` for line entries
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: Color,
    pub shape: Option<MarkerShape>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_cover_lines_and_markers() {
        let mut figure = Figure::new(FigureSize::default());
        figure.add_line(LineSeries::new("Price", Color::BLUE, 1.5, vec![(0.0, 10.0), (10.0, 12.0)]));
        figure.add_scatter(ScatterSeries::new("BUY", MarkerShape::TriangleUp, Color::GREEN, 6.0, vec![(20.0, 8.0)]));
        assert_eq!(figure.data_bounds(), Some((0.0, 20.0, 8.0, 12.0)));
        assert!(Figure::new(FigureSize::default()).data_bounds().is_none());
    }

    #[test]
    fn empty_scatter_is_dropped() {
        let mut figure = Figure::new(FigureSize::default());
        figure.add_scatter(ScatterSeries::new("SELL", MarkerShape::TriangleDown, Color::RED, 6.0, vec![]));
        assert!(figure.scatters.is_empty());
        assert_eq!(figure.marker_count(MarkerShape::TriangleDown), 0);
    }

    #[test]
    fn legend_lists_lines_then_markers() {
        let mut figure = Figure::new(FigureSize::default());
        figure.add_scatter(ScatterSeries::new("BUY", MarkerShape::TriangleUp, Color::GREEN, 6.0, vec![(1.0, 1.0)]));
        figure.add_line(LineSeries::new("Price", Color::BLUE, 1.5, vec![(0.0, 1.0)]));
        let labels: Vec<String> = figure.legend_entries().into_iter().map(|e| e.label).collect();
        assert_eq!(labels, vec!["Price", "BUY"]);
    }
}
