use backtest_visuals::domain::chart::MarkerShape;
use backtest_visuals::domain::errors::{AppError, LookupError};
use backtest_visuals::domain::market_data::{PriceSeries, Signal, SignalKind, Timestamp};
use backtest_visuals::infrastructure::MemoryLogger;
use backtest_visuals::{ChartRenderer, RecordingBackend};
use quickcheck_macros::quickcheck;
use std::sync::Arc;

fn renderer() -> ChartRenderer<RecordingBackend> {
    ChartRenderer::with_logger(RecordingBackend::new(), Arc::new(MemoryLogger::new()))
}

fn minute_bars(len: usize) -> PriceSeries {
    let times: Vec<i64> = (0..len as i64).map(|i| 1_704_186_000_000 + i * 60_000).collect();
    let closes: Vec<f64> = (0..len).map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0).collect();
    PriceSeries::from_columns(&times, &closes).unwrap()
}

#[test]
fn buy_and_sell_markers_sit_on_the_close() {
    let prices = minute_bars(200);
    let signals = [
        Signal::at_position(50, SignalKind::Buy),
        Signal::at_position(100, SignalKind::Sell),
        Signal::at_position(150, SignalKind::Buy),
    ];

    let mut renderer = renderer();
    renderer.render_price_with_signals(&prices, &signals).unwrap();
    let figure = renderer.backend().last_figure().unwrap();

    let expected = |i: usize| prices.get(i).unwrap().xy();
    assert_eq!(figure.markers(MarkerShape::TriangleUp), vec![expected(50), expected(150)]);
    assert_eq!(figure.markers(MarkerShape::TriangleDown), vec![expected(100)]);

    let buy = figure.scatters.iter().find(|s| s.shape == MarkerShape::TriangleUp).unwrap();
    let sell = figure.scatters.iter().find(|s| s.shape == MarkerShape::TriangleDown).unwrap();
    assert_eq!(buy.label, "BUY Signal");
    assert_eq!(sell.label, "SELL Signal");
    assert_ne!(buy.color, sell.color);
    assert_eq!(figure.lines.len(), 1);
    assert_eq!(figure.lines[0].points.len(), 200);
}

#[test]
fn timestamp_signals_resolve_like_positions() {
    let prices = minute_bars(10);
    let at = prices.get(3).unwrap().timestamp;

    let mut renderer = renderer();
    renderer
        .render_price_with_signals(&prices, &[Signal::at_timestamp(at, SignalKind::Sell)])
        .unwrap();
    let figure = renderer.backend().last_figure().unwrap();
    assert_eq!(figure.markers(MarkerShape::TriangleDown), vec![prices.get(3).unwrap().xy()]);
    assert_eq!(figure.marker_count(MarkerShape::TriangleUp), 0);
}

#[test]
fn no_signals_still_draws_the_price_line() {
    let mut renderer = renderer();
    renderer.render_price_with_signals(&minute_bars(5), &[]).unwrap();
    let figure = renderer.backend().last_figure().unwrap();
    assert!(figure.scatters.is_empty());
    assert_eq!(figure.legend_entries().len(), 1);
}

#[test]
fn out_of_range_position_fails_before_drawing() {
    let mut renderer = renderer();
    let err = renderer
        .render_price_with_signals(&minute_bars(5), &[Signal::at_position(5, SignalKind::Buy)])
        .unwrap_err();
    assert_eq!(err, AppError::Lookup(LookupError::PositionOutOfRange { position: 5, len: 5 }));
    assert_eq!(renderer.backend().present_calls(), 0);
}

#[test]
fn unknown_timestamp_fails_before_drawing() {
    let mut renderer = renderer();
    let signals = [
        Signal::at_position(0, SignalKind::Buy),
        Signal::at_timestamp(Timestamp::from_millis(42), SignalKind::Sell),
    ];
    let err = renderer.render_price_with_signals(&minute_bars(5), &signals).unwrap_err();
    assert!(matches!(err, AppError::Lookup(LookupError::MissingTimestamp { timestamp: 42 })));
    assert_eq!(renderer.backend().present_calls(), 0);
}

#[quickcheck]
fn marker_counts_match_signal_kinds(kinds: Vec<bool>) -> bool {
    let kinds: Vec<bool> = kinds.into_iter().take(64).collect();
    let prices = minute_bars(kinds.len().max(1));
    let signals: Vec<Signal> = kinds
        .iter()
        .enumerate()
        .map(|(i, &buy)| Signal::at_position(i, if buy { SignalKind::Buy } else { SignalKind::Sell }))
        .collect();

    let mut renderer = renderer();
    if renderer.render_price_with_signals(&prices, &signals).is_err() {
        return false;
    }
    let figure = renderer.backend().last_figure().unwrap();
    let buys = kinds.iter().filter(|&&b| b).count();
    let sells = kinds.len() - buys;
    figure.marker_count(MarkerShape::TriangleUp) == buys
        && figure.marker_count(MarkerShape::TriangleDown) == sells
        && renderer.backend().present_calls() == 1
}
