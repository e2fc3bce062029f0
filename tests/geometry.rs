use backtest_visuals::domain::chart::{ChartTheme, Color, MarkerShape};
use backtest_visuals::domain::market_data::{PriceSeries, Signal, SignalKind};
use backtest_visuals::infrastructure::MemoryLogger;
use backtest_visuals::infrastructure::rendering::{DrawCommand, FigureGeometry};
use backtest_visuals::{ChartRenderer, RecordingBackend};
use quickcheck_macros::quickcheck;
use std::sync::Arc;

fn renderer() -> ChartRenderer<RecordingBackend> {
    ChartRenderer::with_logger(RecordingBackend::new(), Arc::new(MemoryLogger::new()))
}

fn hourly(closes: &[f64]) -> PriceSeries {
    let times: Vec<i64> = (0..closes.len() as i64).map(|i| i * 3_600_000).collect();
    PriceSeries::from_columns(&times, closes).unwrap()
}

#[test]
fn rendered_signals_project_inside_plot_area() {
    let prices = hourly(&[10.0, 12.0, 9.0, 15.0, 14.0]);
    let signals = [Signal::at_position(2, SignalKind::Buy), Signal::at_position(3, SignalKind::Sell)];
    let renderer = renderer();
    let figure = renderer.price_signals_figure(&prices, &signals).unwrap();

    let geometry = FigureGeometry::build(&figure, renderer.theme());
    let buys = geometry.markers(MarkerShape::TriangleUp);
    let sells = geometry.markers(MarkerShape::TriangleDown);
    assert_eq!(buys.len(), 1);
    assert_eq!(sells.len(), 1);
    assert!(geometry.viewport.contains(buys[0]));
    assert!(geometry.viewport.contains(sells[0]));
    // The sell sits on the highest close, so it is drawn above the buy
    assert!(sells[0].1 < buys[0].1);
}

#[test]
fn hourly_axis_uses_clock_labels() {
    let renderer = renderer();
    let figure = renderer.price_signals_figure(&hourly(&[1.0, 2.0, 3.0]), &[]).unwrap();
    let geometry = FigureGeometry::build(&figure, renderer.theme());
    assert!(geometry.texts().contains(&"00:00"));
    assert!(geometry.texts().contains(&"02:00"));
}

#[test]
fn themed_colors_reach_draw_commands() {
    let theme = ChartTheme::from_json(r##"{"price_color":"#123456","grid_color":"#eeeeee"}"##).unwrap();
    let renderer = renderer().with_theme(theme.clone());
    let figure = renderer.price_signals_figure(&hourly(&[1.0, 2.0]), &[]).unwrap();
    let geometry = FigureGeometry::build(&figure, &theme);

    let polyline_color = geometry.commands.iter().find_map(|c| match c {
        DrawCommand::Polyline { color, .. } => Some(*color),
        _ => None,
    });
    assert_eq!(polyline_color, Some(Color::from_hex(0x123456)));
    assert!(geometry.grid_line_count(Color::from_hex(0xeeeeee)) > 0);
}

#[quickcheck]
fn every_marker_is_inside_the_plot(closes: Vec<u16>) -> bool {
    if closes.is_empty() {
        return true;
    }
    let closes: Vec<f64> = closes.into_iter().take(100).map(f64::from).collect();
    let prices = hourly(&closes);
    let signals: Vec<Signal> = (0..closes.len())
        .map(|i| Signal::at_position(i, if i % 2 == 0 { SignalKind::Buy } else { SignalKind::Sell }))
        .collect();

    let renderer = renderer();
    let figure = renderer.price_signals_figure(&prices, &signals).unwrap();
    let geometry = FigureGeometry::build(&figure, renderer.theme());
    let markers: Vec<(f64, f64)> = geometry
        .markers(MarkerShape::TriangleUp)
        .into_iter()
        .chain(geometry.markers(MarkerShape::TriangleDown))
        .collect();
    markers.len() == closes.len() && markers.iter().all(|p| geometry.viewport.contains(*p))
}

#[test]
fn subnormal_price_span_still_builds() {
    let renderer = renderer();
    let figure = renderer.price_signals_figure(&hourly(&[0.0, 5e-324]), &[]).unwrap();
    let geometry = FigureGeometry::build(&figure, renderer.theme());
    assert!(!geometry.commands.is_empty());
    assert!(geometry.texts().len() < 64);
}
