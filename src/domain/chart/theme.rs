//! Chart styling configuration.
//!
//! Every field has a default matching the classic look of the plots this
//! crate replaces (blue price line, green/red signal triangles, purple equity
//! curve). A theme can be loaded from JSON; missing fields keep their
//! defaults.

use super::value_objects::{Color, FigureSize};
use crate::domain::errors::VisualsResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartTheme {
    pub price_figure_size: FigureSize,
    pub value_figure_size: FigureSize,
    pub background: Color,
    pub foreground: Color,
    pub grid_color: Color,
    pub price_color: Color,
    pub portfolio_color: Color,
    pub buy_color: Color,
    pub sell_color: Color,
    /// Colors cycled through when several price lines share a figure
    pub palette: Vec<Color>,
    pub line_width: f64,
    /// Marker half-size in pixels
    pub marker_size: f64,
    pub font_family: String,
    pub title_font_px: f64,
    pub label_font_px: f64,
    pub tick_font_px: f64,
    pub margins: Margins,
    pub x_ticks: usize,
    pub y_ticks: usize,
    /// Fraction of the value range added above and below the data
    pub value_padding: f64,
}

/// Space around the plot area, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self { left: 80.0, right: 30.0, top: 50.0, bottom: 60.0 }
    }
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            price_figure_size: FigureSize::from_inches(10.0, 6.0),
            value_figure_size: FigureSize::from_inches(10.0, 4.0),
            background: Color::WHITE,
            foreground: Color::BLACK,
            grid_color: Color::from_hex(0xdddddd),
            price_color: Color::BLUE,
            portfolio_color: Color::PURPLE,
            buy_color: Color::GREEN,
            sell_color: Color::RED,
            palette: vec![
                Color::from_hex(0x1f77b4),
                Color::from_hex(0xff7f0e),
                Color::from_hex(0x2ca02c),
                Color::from_hex(0xd62728),
                Color::from_hex(0x9467bd),
                Color::from_hex(0x8c564b),
            ],
            line_width: 1.5,
            marker_size: 6.0,
            font_family: "Arial".to_string(),
            title_font_px: 16.0,
            label_font_px: 13.0,
            tick_font_px: 11.0,
            margins: Margins::default(),
            x_ticks: 6,
            y_ticks: 6,
            value_padding: 0.1,
        }
    }
}

impl ChartTheme {
    pub fn from_json(json: &str) -> VisualsResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Palette color for the i-th line, wrapping around
    pub fn palette_color(&self, index: usize) -> Color {
        if self.palette.is_empty() {
            return self.price_color;
        }
        self.palette[index % self.palette.len()]
    }

    pub fn font(&self, px: f64) -> String {
        format!("{}px {}", px, self.font_family)
    }
}
