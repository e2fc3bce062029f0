use super::entities::{PortfolioValueSeries, PriceSeries, TradeLog};
use super::services::DataLoader;
use super::value_objects::Ticker;
use serde::{Deserialize, Serialize};

/// Interface for looking up a ticker's price table
pub trait PriceTableRepository {
    fn price_table(&self, ticker: &Ticker) -> Option<&PriceSeries>;
}

/// Read-only view of a backtest portfolio
pub trait PortfolioView {
    /// Trades in execution order
    fn trade_log(&self) -> &TradeLog;

    /// Equity history, possibly empty
    fn historical_value(&self) -> PortfolioValueSeries;

    /// Price tables the trades refer to
    fn data_loader(&self) -> &dyn PriceTableRepository;
}

impl<T: PortfolioView + ?Sized> PortfolioView for &T {
    fn trade_log(&self) -> &TradeLog {
        (**self).trade_log()
    }

    fn historical_value(&self) -> PortfolioValueSeries {
        (**self).historical_value()
    }

    fn data_loader(&self) -> &dyn PriceTableRepository {
        (**self).data_loader()
    }
}

/// Plain snapshot of a portfolio after a backtest run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    #[serde(default)]
    pub trade_log: TradeLog,
    #[serde(default, alias = "history")]
    pub value_history: PortfolioValueSeries,
    #[serde(default, alias = "prices")]
    pub data: DataLoader,
}

impl PortfolioSnapshot {
    pub fn new(trade_log: TradeLog, value_history: PortfolioValueSeries, data: DataLoader) -> Self {
        Self { trade_log, value_history, data }
    }
}

impl PortfolioView for PortfolioSnapshot {
    fn trade_log(&self) -> &TradeLog {
        &self.trade_log
    }

    fn historical_value(&self) -> PortfolioValueSeries {
        self.value_history.clone()
    }

    fn data_loader(&self) -> &dyn PriceTableRepository {
        &self.data
    }
}
