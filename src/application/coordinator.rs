use super::chart_service::ChartRenderer;
use crate::domain::{
    errors::VisualsResult,
    logging::LogComponent,
    market_data::{PortfolioView, Ticker},
};
use crate::infrastructure::rendering::ChartBackend;
use indexmap::IndexMap;

const COMPONENT: LogComponent = LogComponent::Application("ChartCoordinator");

impl<B: ChartBackend> ChartRenderer<B> {
    /// Trade charts for every (strategy, ticker) pair followed by each
    /// strategy's equity curve.
    ///
    /// Strategies are visited in map insertion order and tickers in slice
    /// order. The first failure stops the run.
    pub fn render_all<P: PortfolioView>(
        &mut self,
        portfolios: &IndexMap<String, P>,
        tickers: &[Ticker],
    ) -> VisualsResult<()> {
        self.logger.debug(
            COMPONENT,
            &format!(
                "Rendering {} strategies across {} tickers",
                portfolios.len(),
                tickers.len()
            ),
        );

        for (strategy_name, portfolio) in portfolios {
            for ticker in tickers {
                self.render_strategy_trade_markers(portfolio, ticker, strategy_name)?;
            }
            self.render_strategy_portfolio_over_time(portfolio, strategy_name)?;
        }
        Ok(())
    }
}
