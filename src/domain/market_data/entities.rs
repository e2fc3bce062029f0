pub use super::value_objects::{Price, SignalKind, Ticker, Timestamp};
use crate::domain::errors::{AppError, LookupError, VisualsResult};
use serde::{Deserialize, Serialize};

/// One row of a price table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    #[serde(rename = "datetime")]
    pub timestamp: Timestamp,
    pub close: Price,
}

impl PricePoint {
    pub fn new(timestamp: Timestamp, close: Price) -> Self {
        Self { timestamp, close }
    }

    pub fn xy(&self) -> (f64, f64) {
        (self.timestamp.as_f64(), self.close.value())
    }
}

/// Domain entity - ordered closing prices, timestamps strictly increasing
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(points: Vec<PricePoint>) -> VisualsResult<Self> {
        if let Some(pair) = points.windows(2).find(|w| w[1].timestamp <= w[0].timestamp) {
            return Err(AppError::ValidationError(format!(
                "price series timestamps must be strictly increasing ({} followed by {})",
                pair[0].timestamp.value(),
                pair[1].timestamp.value()
            )));
        }
        Ok(Self { points })
    }

    /// Build from parallel `datetime` / `close` columns
    pub fn from_columns(datetimes: &[i64], closes: &[f64]) -> VisualsResult<Self> {
        if datetimes.len() != closes.len() {
            return Err(AppError::ValidationError(format!(
                "column length mismatch: {} datetimes, {} closes",
                datetimes.len(),
                closes.len()
            )));
        }
        let points = datetimes
            .iter()
            .zip(closes)
            .map(|(&t, &c)| PricePoint::new(Timestamp::from(t), Price::from(c)))
            .collect();
        Self::new(points)
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&PricePoint> {
        self.points.get(position)
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    pub fn position_of(&self, timestamp: Timestamp) -> Option<usize> {
        self.points.binary_search_by_key(&timestamp, |p| p.timestamp).ok()
    }

    /// Resolve a signal reference to the point it names
    pub fn resolve(&self, at: &SignalRef) -> Result<PricePoint, LookupError> {
        match *at {
            SignalRef::Timestamp(ts) => self
                .position_of(ts)
                .map(|i| self.points[i])
                .ok_or(LookupError::MissingTimestamp { timestamp: ts.value() }),
            SignalRef::Position(position) => self.at_position(position),
        }
    }

    pub fn at_position(&self, position: usize) -> Result<PricePoint, LookupError> {
        self.points
            .get(position)
            .copied()
            .ok_or(LookupError::PositionOutOfRange { position, len: self.points.len() })
    }

    /// Last `lookback` points, or everything when the series is shorter
    pub fn tail(&self, lookback: usize) -> PriceSeries {
        let start = self.points.len().saturating_sub(lookback);
        PriceSeries { points: self.points[start..].to_vec() }
    }


    pub fn xy(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(PricePoint::xy).collect()
    }
}

impl<'de> Deserialize<'de> for PriceSeries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let points = Vec::<PricePoint>::deserialize(deserializer)?;
        PriceSeries::new(points).map_err(serde::de::Error::custom)
    }
}

/// Where a signal points into a price series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalRef {
    Timestamp(Timestamp),
    Position(usize),
}

/// Domain entity - labelled BUY/SELL reference into a price series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    pub at: SignalRef,
    pub kind: SignalKind,
}

impl Signal {
    pub fn new(at: SignalRef, kind: SignalKind) -> Self {
        Self { at, kind }
    }

    pub fn at_position(position: usize, kind: SignalKind) -> Self {
        Self::new(SignalRef::Position(position), kind)
    }

    pub fn at_timestamp(timestamp: Timestamp, kind: SignalKind) -> Self {
        Self::new(SignalRef::Timestamp(timestamp), kind)
    }
}

/// Domain entity - one executed trade as recorded by a portfolio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub ticker: Ticker,
    pub side: SignalKind,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub price: Option<Price>,
    /// Position of the bar the trade happened on, in the ticker's price table
    #[serde(alias = "index")]
    pub bar_index: usize,
}

impl Trade {
    pub fn new(ticker: impl Into<Ticker>, side: SignalKind, quantity: i64, price: f64, bar_index: usize) -> Self {
        Self {
            ticker: ticker.into(),
            side,
            quantity,
            price: Some(Price::from(price)),
            bar_index,
        }
    }
}

/// Ordered collection of trades
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TradeLog {
    trades: Vec<Trade>,
}

impl TradeLog {
    pub fn new(trades: Vec<Trade>) -> Self {
        Self { trades }
    }

    pub fn push(&mut self, trade: Trade) {
        self.trades.push(trade);
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    /// Trades for `ticker`, split into (buys, sells), log order preserved
    pub fn partition_for_ticker(&self, ticker: &Ticker) -> (Vec<&Trade>, Vec<&Trade>) {
        self.trades
            .iter()
            .filter(|t| &t.ticker == ticker)
            .partition(|t| t.side.is_buy())
    }
}

/// One portfolio valuation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortfolioValuePoint {
    pub timestamp: Timestamp,
    #[serde(alias = "portfolio_value")]
    pub value: f64,
}

/// Domain entity - equity over time, possibly empty
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<PortfolioValuePoint>", into = "Vec<PortfolioValuePoint>")]
pub struct PortfolioValueSeries {
    points: Vec<PortfolioValuePoint>,
}

impl PortfolioValueSeries {
    /// Points are kept in time order; history rows may arrive unsorted
    pub fn new(mut points: Vec<PortfolioValuePoint>) -> Self {
        points.sort_by_key(|p| p.timestamp);
        Self { points }
    }

    pub fn from_pairs(pairs: &[(i64, f64)]) -> Self {
        Self::new(
            pairs
                .iter()
                .map(|&(t, value)| PortfolioValuePoint { timestamp: Timestamp::from(t), value })
                .collect(),
        )
    }

    pub fn points(&self) -> &[PortfolioValuePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn xy(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.timestamp.as_f64(), p.value)).collect()
    }
}

impl From<Vec<PortfolioValuePoint>> for PortfolioValueSeries {
    fn from(points: Vec<PortfolioValuePoint>) -> Self {
        Self::new(points)
    }
}

impl From<PortfolioValueSeries> for Vec<PortfolioValuePoint> {
    fn from(series: PortfolioValueSeries) -> Self {
        series.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> PriceSeries {
        PriceSeries::from_columns(&[10, 20, 30], &[1.0, 3.0, 2.0]).unwrap()
    }

    #[test]
    fn rejects_unordered_timestamps() {
        assert!(PriceSeries::from_columns(&[10, 10], &[1.0, 2.0]).is_err());
        assert!(PriceSeries::from_columns(&[20, 10], &[1.0, 2.0]).is_err());
        assert!(PriceSeries::from_columns(&[10], &[1.0, 2.0]).is_err());
    }

    #[test]
    fn resolves_by_timestamp_and_position() {
        let s = series();
        let p = s.resolve(&SignalRef::Timestamp(Timestamp::from(20))).unwrap();
        assert_eq!(p.close.value(), 3.0);
        let p = s.resolve(&SignalRef::Position(2)).unwrap();
        assert_eq!(p.timestamp.value(), 30);

        assert_eq!(
            s.resolve(&SignalRef::Timestamp(Timestamp::from(25))),
            Err(LookupError::MissingTimestamp { timestamp: 25 })
        );
        assert_eq!(
            s.resolve(&SignalRef::Position(3)),
            Err(LookupError::PositionOutOfRange { position: 3, len: 3 })
        );
    }

    #[test]
    fn tail_keeps_last_points() {
        let s = series();
        assert_eq!(s.tail(2).len(), 2);
        assert_eq!(s.tail(2).points()[0].timestamp.value(), 20);
        assert_eq!(s.tail(10).len(), 3);
    }

    #[test]
    fn trade_log_filters_and_partitions() {
        let log = TradeLog::new(vec![
            Trade::new("AMD", SignalKind::Buy, 10, 100.0, 1),
            Trade::new("NVDA", SignalKind::Sell, 10, 400.0, 2),
            Trade::new("AMD", SignalKind::Sell, 10, 110.0, 3),
        ]);
        let (buys, sells) = log.partition_for_ticker(&Ticker::from("amd"));
        assert_eq!(buys.len(), 1);
        assert_eq!(sells.len(), 1);
        assert_eq!(sells[0].bar_index, 3);
    }

    #[test]
    fn partitioned_trades_outlive_the_ticker_key() {
        let log = TradeLog::new(vec![
            Trade::new("AMD", SignalKind::Buy, 10, 100.0, 1),
            Trade::new("AMD", SignalKind::Sell, 10, 110.0, 3),
        ]);
        let (buys, sells) = {
            let ticker = Ticker::from("AMD");
            log.partition_for_ticker(&ticker)
        };
        assert_eq!(buys[0].bar_index, 1);
        assert_eq!(sells[0].bar_index, 3);
    }

    #[test]
    fn trade_deserializes_original_field_names() {
        let trade: Trade =
            serde_json::from_str(r#"{"ticker":"amd","side":"BUY","quantity":10,"price":101.5,"index":7}"#).unwrap();
        assert_eq!(trade.ticker.value(), "AMD");
        assert_eq!(trade.bar_index, 7);
        assert_eq!(trade.side, SignalKind::Buy);
    }

    #[test]
    fn value_series_sorts_history() {
        let v = PortfolioValueSeries::from_pairs(&[(3, 1.0), (1, 2.0)]);
        assert_eq!(v.points()[0].timestamp.value(), 1);
        let parsed: PortfolioValueSeries =
            serde_json::from_str(r#"[{"timestamp":5,"portfolio_value":100000.0}]"#).unwrap();
        assert_eq!(parsed.points()[0].value, 100000.0);
    }
}
