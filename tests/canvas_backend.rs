#![cfg(feature = "render")]

use backtest_visuals::domain::market_data::{PriceSeries, Signal, SignalKind};
use backtest_visuals::infrastructure::rendering::{CanvasBackend, FigureOutput};
use backtest_visuals::{ChartRenderer, VisualsApi};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn container(id: &str) -> web_sys::Element {
    let document = web_sys::window().unwrap().document().unwrap();
    let div = document.create_element("div").unwrap();
    div.set_id(id);
    document.body().unwrap().append_child(&div).unwrap();
    div
}

#[wasm_bindgen_test]
fn show_appends_sized_canvas() {
    let host = container("visuals-show");
    let prices = PriceSeries::from_columns(&[0, 60_000, 120_000], &[10.0, 11.0, 10.5]).unwrap();
    let mut renderer = ChartRenderer::new(CanvasBackend::new("visuals-show"));
    renderer
        .render_price_with_signals(&prices, &[Signal::at_position(1, SignalKind::Buy)])
        .unwrap();

    let canvas = host
        .first_element_child()
        .unwrap()
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .unwrap();
    assert_eq!(canvas.width(), 1000);
    assert_eq!(canvas.height(), 600);
    assert_eq!(canvas.get_attribute("data-title").as_deref(), Some("Price With Buy/Sell Signals"));
}

#[wasm_bindgen_test]
fn capture_keeps_png_data_urls() {
    let host = container("visuals-capture");
    let backend = CanvasBackend::new("visuals-capture").with_output(FigureOutput::Capture);
    let mut renderer = ChartRenderer::new(backend);
    let values = backtest_visuals::domain::market_data::PortfolioValueSeries::from_pairs(&[(0, 1.0), (1_000, 2.0)]);
    renderer.render_portfolio_value(&values).unwrap();

    let captured = renderer.backend_mut().take_captured();
    assert_eq!(captured.len(), 1);
    assert!(captured[0].starts_with("data:image/png"));
    assert!(host.first_element_child().is_none());
}

#[wasm_bindgen_test]
fn api_rejects_bad_json_and_renders_good_json() {
    container("visuals-api");
    let mut api = VisualsApi::new("visuals-api".to_string());
    assert!(api.render_portfolio_value("not json").is_err());

    api.render_price_with_signals(
        r#"[{"datetime":"2024-01-02 09:30:00","close":10.0},{"datetime":"2024-01-02 09:35:00","close":11.0}]"#,
        r#"[{"at":{"position":1},"kind":"SELL"}]"#,
    )
    .unwrap();
    assert_eq!(api.figures_drawn(), 1);
}
