use super::entities::Figure;
use super::theme::ChartTheme;
use super::value_objects::Viewport;

/// Domain service for chart layout
pub struct ChartLayoutService;

impl ChartLayoutService {
    pub fn new() -> Self {
        Self
    }

    /// Plot area of the figure, scaled to its data.
    ///
    /// The value axis gets `theme.value_padding` of the range above and below
    /// the data; the time axis spans the data exactly. Without any data the
    /// default unit ranges are kept.
    pub fn viewport_for(&self, figure: &Figure, theme: &ChartTheme) -> Viewport {
        let m = theme.margins;
        let width = (figure.size.width as f64 - m.left - m.right).max(1.0);
        let height = (figure.size.height as f64 - m.top - m.bottom).max(1.0);
        let mut viewport = Viewport::new(m.left, m.top, width, height);

        if let Some((min_x, max_x, min_y, max_y)) = figure.data_bounds() {
            let padding = if max_y > min_y {
                (max_y - min_y) * theme.value_padding
            } else {
                // Flat series: open up a band around the single value
                (min_y.abs() * theme.value_padding).max(1.0)
            };
            viewport.start_time = min_x;
            viewport.end_time = max_x;
            viewport.min_value = min_y - padding;
            viewport.max_value = max_y + padding;
        }

        viewport
    }

    /// Round tick values covering [min, max], about `count` of them
    pub fn nice_ticks(&self, min: f64, max: f64, count: usize) -> Vec<f64> {
        if !(min.is_finite() && max.is_finite()) || count == 0 {
            return Vec::new();
        }
        if max <= min {
            return vec![min];
        }
        let step = Self::nice_step((max - min) / count as f64);
        let first = (min / step).ceil() * step;
        // Subnormal spans underflow the step to zero
        if !(step.is_finite() && step > 0.0 && first.is_finite()) {
            return vec![min];
        }
        let mut ticks = Vec::new();
        for i in 0..=count * 4 {
            let tick = first + i as f64 * step;
            if tick > max + step * 1e-9 {
                break;
            }
            // Avoid printing -0.00
            ticks.push(if tick.abs() < step * 1e-9 { 0.0 } else { tick });
        }
        ticks
    }

    /// Evenly spaced ticks including both ends
    pub fn even_ticks(&self, start: f64, end: f64, count: usize) -> Vec<f64> {
        match count {
            0 => Vec::new(),
            1 => vec![start],
            _ if end <= start => vec![start],
            _ => (0..count)
                .map(|i| start + (end - start) * i as f64 / (count - 1) as f64)
                .collect(),
        }
    }

    fn nice_step(raw: f64) -> f64 {
        let magnitude = 10f64.powi(raw.log10().floor() as i32);
        let residual = raw / magnitude;
        let nice = if residual <= 1.0 {
            1.0
        } else if residual <= 2.0 {
            2.0
        } else if residual <= 5.0 {
            5.0
        } else {
            10.0
        };
        nice * magnitude
    }
}

impl Default for ChartLayoutService {
    fn default() -> Self {
        Self::new()
    }
}
