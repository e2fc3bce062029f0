use crate::application::ChartRenderer;
use crate::domain::{
    chart::ChartTheme,
    errors::{AppError, VisualsResult},
    market_data::{PortfolioSnapshot, PortfolioValueSeries, PriceSeries, Signal, Ticker},
};
use crate::infrastructure::rendering::{CanvasBackend, FigureOutput};
use indexmap::IndexMap;
use js_sys::Array;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

/// WASM API for JavaScript.
///
/// Every input is a JSON string; failures reject with the error message.
/// Figures are appended to the container element, or captured as PNG data
/// URLs after `setCapture(true)`.
#[wasm_bindgen]
pub struct VisualsApi {
    renderer: ChartRenderer<CanvasBackend>,
}

#[wasm_bindgen]
impl VisualsApi {
    #[wasm_bindgen(constructor)]
    pub fn new(container_id: String) -> Self {
        Self { renderer: ChartRenderer::new(CanvasBackend::new(container_id)) }
    }

    #[wasm_bindgen(js_name = setTheme)]
    pub fn set_theme(&mut self, theme_json: &str) -> Result<(), JsValue> {
        let theme = ChartTheme::from_json(theme_json).map_err(to_js)?;
        self.renderer.backend_mut().set_theme(theme.clone());
        self.renderer.set_theme(theme);
        Ok(())
    }

    #[wasm_bindgen(js_name = setCapture)]
    pub fn set_capture(&mut self, capture: bool) {
        let output = if capture { FigureOutput::Capture } else { FigureOutput::Show };
        self.renderer.backend_mut().set_output(output);
    }

    /// PNG data URLs captured since the last call
    #[wasm_bindgen(js_name = takeCaptured)]
    pub fn take_captured(&mut self) -> Array {
        self.renderer
            .backend_mut()
            .take_captured()
            .into_iter()
            .map(JsValue::from)
            .collect()
    }

    #[wasm_bindgen(js_name = renderPriceWithSignals)]
    pub fn render_price_with_signals(&mut self, prices_json: &str, signals_json: &str) -> Result<(), JsValue> {
        let prices: PriceSeries = parse(prices_json)?;
        let signals: Vec<Signal> = parse(signals_json)?;
        self.renderer.render_price_with_signals(&prices, &signals).map_err(to_js)
    }

    #[wasm_bindgen(js_name = renderPortfolioValue)]
    pub fn render_portfolio_value(&mut self, values_json: &str) -> Result<(), JsValue> {
        let values: PortfolioValueSeries = parse(values_json)?;
        self.renderer.render_portfolio_value(&values).map_err(to_js)
    }

    #[wasm_bindgen(js_name = renderStrategyResults)]
    pub fn render_strategy_results(
        &mut self,
        portfolio_json: &str,
        ticker: &str,
        strategy_name: &str,
    ) -> Result<(), JsValue> {
        let portfolio: PortfolioSnapshot = parse(portfolio_json)?;
        self.renderer
            .render_strategy_trade_markers(&portfolio, &Ticker::from(ticker), strategy_name)
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = renderPortfolioOverTime)]
    pub fn render_portfolio_over_time(&mut self, portfolio_json: &str, strategy_name: &str) -> Result<(), JsValue> {
        let portfolio: PortfolioSnapshot = parse(portfolio_json)?;
        self.renderer
            .render_strategy_portfolio_over_time(&portfolio, strategy_name)
            .map_err(to_js)
    }

    /// `portfolios_json` is an object keyed by strategy name; key order is kept
    #[wasm_bindgen(js_name = renderAll)]
    pub fn render_all(&mut self, portfolios_json: &str, tickers: Array) -> Result<(), JsValue> {
        let portfolios: IndexMap<String, PortfolioSnapshot> = parse(portfolios_json)?;
        let tickers = tickers_from(&tickers)?;
        self.renderer.render_all(&portfolios, &tickers).map_err(to_js)
    }

    #[wasm_bindgen(js_name = renderCombined)]
    pub fn render_combined(&mut self, portfolio_json: &str, tickers: Array, strategy_name: &str) -> Result<(), JsValue> {
        let portfolio: PortfolioSnapshot = parse(portfolio_json)?;
        let tickers = tickers_from(&tickers)?;
        self.renderer
            .render_combined_prices(&portfolio, &tickers, strategy_name)
            .map_err(to_js)
    }

    /// The price/signals figure as JSON, without drawing it
    #[wasm_bindgen(js_name = priceSignalsFigureJson)]
    pub fn price_signals_figure_json(&self, prices_json: &str, signals_json: &str) -> Result<String, JsValue> {
        let prices: PriceSeries = parse(prices_json)?;
        let signals: Vec<Signal> = parse(signals_json)?;
        let figure = self.renderer.price_signals_figure(&prices, &signals).map_err(to_js)?;
        serde_json::to_string(&figure).map_err(|e| to_js(e.into()))
    }

    #[wasm_bindgen(js_name = figuresDrawn)]
    pub fn figures_drawn(&self) -> usize {
        self.renderer.backend().figures_drawn()
    }
}

fn parse<T: DeserializeOwned>(json: &str) -> Result<T, JsValue> {
    let parsed: VisualsResult<T> = serde_json::from_str(json).map_err(AppError::from);
    parsed.map_err(to_js)
}

fn tickers_from(array: &Array) -> Result<Vec<Ticker>, JsValue> {
    array
        .iter()
        .map(|value| {
            value
                .as_string()
                .map(Ticker::from)
                .ok_or_else(|| to_js(AppError::ValidationError("tickers must be strings".to_string())))
        })
        .collect()
}

fn to_js(error: AppError) -> JsValue {
    let message = error.to_string();
    gloo::console::error!(message.as_str());
    JsValue::from_str(&message)
}
