use crate::domain::{
    chart::{ChartTheme, Figure, LineSeries, MarkerShape, ScatterSeries},
    errors::{LookupError, VisualsResult},
    logging::{LogComponent, Logger},
    market_data::{PortfolioValueSeries, PortfolioView, PriceSeries, Signal, SignalKind, Ticker, Trade},
};
use crate::infrastructure::{logging::setup_visuals_logger, rendering::ChartBackend};
use std::sync::Arc;

const COMPONENT: LogComponent = LogComponent::Application("ChartRenderer");

pub const PRICE_SIGNALS_TITLE: &str = "Price With Buy/Sell Signals";
pub const EQUITY_CURVE_TITLE: &str = "Portfolio Equity Curve";
pub const VALUE_OVER_TIME_TITLE: &str = "Portfolio Value Over Time";
pub const COMBINED_TITLE: &str = "Combined Prices with Signals";

/// Application service that turns backtest data into figures.
///
/// Every render call builds one `Figure`, hands it to the backend once and
/// drops it. The renderer keeps no figure state between calls.
pub struct ChartRenderer<B: ChartBackend> {
    backend: B,
    theme: ChartTheme,
    pub(super) logger: Arc<dyn Logger>,
}

impl<B: ChartBackend> ChartRenderer<B> {
    /// Renderer logging to the shared "Visuals" logger
    pub fn new(backend: B) -> Self {
        Self::with_logger(backend, setup_visuals_logger())
    }

    pub fn with_logger(backend: B, logger: Arc<dyn Logger>) -> Self {
        Self { backend, theme: ChartTheme::default(), logger }
    }

    pub fn with_theme(mut self, theme: ChartTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn theme(&self) -> &ChartTheme {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: ChartTheme) {
        self.theme = theme;
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Price line with BUY/SELL markers.
    ///
    /// Every signal is resolved against `prices` first; a signal pointing at
    /// a missing timestamp or position fails the call and nothing is drawn.
    pub fn render_price_with_signals(&mut self, prices: &PriceSeries, signals: &[Signal]) -> VisualsResult<()> {
        self.logger.info(COMPONENT, "Plotting signals.");
        let figure = self.price_signals_figure(prices, signals)?;
        self.backend.present(&figure)?;
        self.logger.info(COMPONENT, "Finished plotting signals.");
        Ok(())
    }

    pub fn render_portfolio_value(&mut self, values: &PortfolioValueSeries) -> VisualsResult<()> {
        self.logger.info(COMPONENT, "Plotting portfolio value.");
        let figure = self.value_figure(values, EQUITY_CURVE_TITLE.to_string());
        self.backend.present(&figure)?;
        self.logger.info(COMPONENT, "Finished plotting portfolio value.");
        Ok(())
    }

    /// Trades of one ticker drawn over that ticker's price table
    pub fn render_strategy_trade_markers<P: PortfolioView + ?Sized>(
        &mut self,
        portfolio: &P,
        ticker: &Ticker,
        strategy_name: &str,
    ) -> VisualsResult<()> {
        self.logger.info(
            COMPONENT,
            &format!("Plotting {} trades for strategy {}.", ticker, strategy_name),
        );
        let figure = self.strategy_trades_figure(portfolio, ticker, strategy_name)?;
        self.backend.present(&figure)?;
        self.logger.info(
            COMPONENT,
            &format!("Finished plotting {} trades for strategy {}.", ticker, strategy_name),
        );
        Ok(())
    }

    /// Equity curve of one strategy; an empty history only logs a warning
    pub fn render_strategy_portfolio_over_time<P: PortfolioView + ?Sized>(
        &mut self,
        portfolio: &P,
        strategy_name: &str,
    ) -> VisualsResult<()> {
        let history = portfolio.historical_value();
        if history.is_empty() {
            self.logger.warn(
                COMPONENT,
                &format!("No historical portfolio data available for strategy {}.", strategy_name),
            );
            return Ok(());
        }

        self.logger.info(
            COMPONENT,
            &format!("Plotting portfolio value over time for strategy {}.", strategy_name),
        );
        let figure = self.value_figure(&history, format!("{}: {}", strategy_name, VALUE_OVER_TIME_TITLE));
        self.backend.present(&figure)?;
        self.logger.info(
            COMPONENT,
            &format!("Finished plotting portfolio value over time for strategy {}.", strategy_name),
        );
        Ok(())
    }

    /// All tickers' prices and trade markers on a single figure
    pub fn render_combined_prices<P: PortfolioView + ?Sized>(
        &mut self,
        portfolio: &P,
        tickers: &[Ticker],
        strategy_name: &str,
    ) -> VisualsResult<()> {
        self.logger.info(
            COMPONENT,
            &format!("Plotting combined prices for strategy {}.", strategy_name),
        );
        let figure = self.combined_figure(portfolio, tickers, strategy_name)?;
        self.backend.present(&figure)?;
        self.logger.info(
            COMPONENT,
            &format!("Finished plotting combined prices for strategy {}.", strategy_name),
        );
        Ok(())
    }

    pub fn price_signals_figure(&self, prices: &PriceSeries, signals: &[Signal]) -> VisualsResult<Figure> {
        let mut buys = Vec::new();
        let mut sells = Vec::new();
        for signal in signals {
            let point = prices.resolve(&signal.at)?;
            match signal.kind {
                SignalKind::Buy => buys.push(point.xy()),
                SignalKind::Sell => sells.push(point.xy()),
            }
        }

        let mut figure = self.price_figure(PRICE_SIGNALS_TITLE.to_string());
        figure.add_line(LineSeries::new("Price", self.theme.price_color, self.theme.line_width, prices.xy()));
        self.add_signal_markers(&mut figure, buys, sells, true);
        Ok(figure)
    }

    pub fn strategy_trades_figure<P: PortfolioView + ?Sized>(
        &self,
        portfolio: &P,
        ticker: &Ticker,
        strategy_name: &str,
    ) -> VisualsResult<Figure> {
        let prices = Self::price_table(portfolio, ticker)?;
        let (buys, sells) = Self::trade_points(portfolio, ticker, prices)?;

        let title = format!("{}: {} {}", strategy_name, ticker, PRICE_SIGNALS_TITLE);
        let mut figure = self.price_figure(title);
        figure.add_line(LineSeries::new(
            format!("{} Price", ticker),
            self.theme.price_color,
            self.theme.line_width,
            prices.xy(),
        ));
        self.add_signal_markers(&mut figure, buys, sells, true);
        Ok(figure)
    }

    pub fn combined_figure<P: PortfolioView + ?Sized>(
        &self,
        portfolio: &P,
        tickers: &[Ticker],
        strategy_name: &str,
    ) -> VisualsResult<Figure> {
        let mut figure = self.price_figure(format!("{}: {}", strategy_name, COMBINED_TITLE));
        for (i, ticker) in tickers.iter().enumerate() {
            let prices = Self::price_table(portfolio, ticker)?;
            let (buys, sells) = Self::trade_points(portfolio, ticker, prices)?;
            figure.add_line(LineSeries::new(
                format!("{} Price", ticker),
                self.theme.palette_color(i),
                self.theme.line_width,
                prices.xy(),
            ));
            // Markers stay out of the legend; the lines identify the tickers
            self.add_signal_markers(&mut figure, buys, sells, false);
        }
        Ok(figure)
    }

    fn price_figure(&self, title: String) -> Figure {
        Figure::new(self.theme.price_figure_size)
            .with_title(title)
            .with_labels("Date", "Price")
            .with_legend(true)
            .with_grid(true)
    }

    fn value_figure(&self, values: &PortfolioValueSeries, title: String) -> Figure {
        let mut figure = Figure::new(self.theme.value_figure_size)
            .with_title(title)
            .with_labels("Date", "Portfolio Value")
            .with_legend(true)
            .with_grid(true);
        figure.add_line(LineSeries::new(
            "Portfolio Value",
            self.theme.portfolio_color,
            self.theme.line_width,
            values.xy(),
        ));
        figure
    }

    fn add_signal_markers(&self, figure: &mut Figure, buys: Vec<(f64, f64)>, sells: Vec<(f64, f64)>, labelled: bool) {
        let (buy_label, sell_label) = if labelled { ("BUY Signal", "SELL Signal") } else { ("", "") };
        figure.add_scatter(ScatterSeries::new(
            buy_label,
            MarkerShape::TriangleUp,
            self.theme.buy_color,
            self.theme.marker_size,
            buys,
        ));
        figure.add_scatter(ScatterSeries::new(
            sell_label,
            MarkerShape::TriangleDown,
            self.theme.sell_color,
            self.theme.marker_size,
            sells,
        ));
    }

    fn price_table<'p, P: PortfolioView + ?Sized>(portfolio: &'p P, ticker: &Ticker) -> VisualsResult<&'p PriceSeries> {
        portfolio
            .data_loader()
            .price_table(ticker)
            .ok_or_else(|| LookupError::UnknownTicker(ticker.to_string()).into())
    }

    /// (buy points, sell points) for the ticker's trades, log order kept
    fn trade_points<P: PortfolioView + ?Sized>(
        portfolio: &P,
        ticker: &Ticker,
        prices: &PriceSeries,
    ) -> VisualsResult<(Vec<(f64, f64)>, Vec<(f64, f64)>)> {
        let (buys, sells) = portfolio.trade_log().partition_for_ticker(ticker);
        let locate = |trades: Vec<&Trade>| -> VisualsResult<Vec<(f64, f64)>> {
            trades
                .into_iter()
                .map(|t| -> VisualsResult<(f64, f64)> { Ok(prices.at_position(t.bar_index)?.xy()) })
                .collect()
        };
        Ok((locate(buys)?, locate(sells)?))
    }
}
