use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};

/// Value Object - scatter marker shape
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, AsRefStr, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerShape {
    #[display(fmt = "^")]
    #[strum(serialize = "triangle-up", serialize = "^")]
    TriangleUp,
    #[display(fmt = "v")]
    #[strum(serialize = "triangle-down", serialize = "v")]
    TriangleDown,
}

/// Value Object - figure size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FigureSize {
    pub width: u32,
    pub height: u32,
}

impl FigureSize {
    pub const DPI: f64 = 100.0;

    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn from_inches(width: f64, height: f64) -> Self {
        Self {
            width: (width * Self::DPI).round() as u32,
            height: (height * Self::DPI).round() as u32,
        }
    }
}

impl Default for FigureSize {
    fn default() -> Self {
        Self::from_inches(10.0, 6.0)
    }
}

/// Value Object - Viewport
///
/// Maps data coordinates (time on x, value on y) into the pixel rectangle of
/// the plot area. Y grows downwards on screen, so values are inverted.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pub start_time: f64,
    pub end_time: f64,
    pub min_value: f64,
    pub max_value: f64,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            start_time: 0.0,
            end_time: 1.0,
            min_value: 0.0,
            max_value: 1.0,
            left: 0.0,
            top: 0.0,
            width: 800.0,
            height: 600.0,
        }
    }
}

impl Viewport {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height, ..Default::default() }
    }

    pub fn time_range(&self) -> f64 {
        self.end_time - self.start_time
    }

    pub fn value_range(&self) -> f64 {
        self.max_value - self.min_value
    }

    /// Convert a timestamp to a screen X coordinate
    pub fn time_to_x(&self, time: f64) -> f64 {
        if self.time_range() == 0.0 {
            return self.left + self.width / 2.0;
        }
        let normalized = (time - self.start_time) / self.time_range();
        self.left + normalized * self.width
    }

    /// Convert a value to a screen Y coordinate
    pub fn value_to_y(&self, value: f64) -> f64 {
        if self.value_range() == 0.0 {
            return self.top + self.height / 2.0;
        }
        let normalized = (value - self.min_value) / self.value_range();
        self.top + self.height * (1.0 - normalized) // Invert Y
    }

    pub fn project(&self, (time, value): (f64, f64)) -> (f64, f64) {
        (self.time_to_x(time), self.value_to_y(value))
    }

    pub fn contains(&self, (x, y): (f64, f64)) -> bool {
        x >= self.left && x <= self.left + self.width && y >= self.top && y <= self.top + self.height
    }
}

/// Value Object - Color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    pub fn to_hex(&self) -> u32 {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    pub fn with_alpha(&self, alpha: f32) -> Self {
        Self { a: alpha, ..*self }
    }

    /// CSS color string for canvas fill/stroke styles
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:06x}", self.to_hex())
        } else {
            let hex = self.to_hex();
            format!("rgba({}, {}, {}, {:.3})", (hex >> 16) & 0xFF, (hex >> 8) & 0xFF, hex & 0xFF, self.a)
        }
    }

    /// Parse `#rrggbb` or one of the basic color names
    pub fn parse(text: &str) -> Result<Self, String> {
        let text = text.trim();
        if let Some(hex) = text.strip_prefix('#') {
            if hex.len() == 6 {
                if let Ok(value) = u32::from_str_radix(hex, 16) {
                    return Ok(Self::from_hex(value));
                }
            }
            return Err(format!("invalid hex color '{}'", text));
        }
        match text.to_ascii_lowercase().as_str() {
            "black" => Ok(Self::BLACK),
            "white" => Ok(Self::WHITE),
            "red" => Ok(Self::RED),
            "green" => Ok(Self::GREEN),
            "blue" => Ok(Self::BLUE),
            "purple" => Ok(Self::PURPLE),
            "orange" => Ok(Self::ORANGE),
            "gray" | "grey" => Ok(Self::GRAY),
            other => Err(format!("unknown color '{}'", other)),
        }
    }

    /// Predefined colors
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const RED: Color = Color { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const GREEN: Color = Color { r: 0.0, g: 128.0 / 255.0, b: 0.0, a: 1.0 };
    pub const BLUE: Color = Color { r: 0.0, g: 0.0, b: 1.0, a: 1.0 };
    pub const PURPLE: Color = Color { r: 128.0 / 255.0, g: 0.0, b: 128.0 / 255.0, a: 1.0 };
    pub const ORANGE: Color = Color { r: 1.0, g: 165.0 / 255.0, b: 0.0, a: 1.0 };
    pub const GRAY: Color = Color { r: 128.0 / 255.0, g: 128.0 / 255.0, b: 128.0 / 255.0, a: 1.0 };
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_css()
    }
}
