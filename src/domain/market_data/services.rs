use super::entities::{PricePoint, PriceSeries};
use super::repositories::PriceTableRepository;
use super::value_objects::{Price, Ticker};
use crate::domain::errors::AppError;
use crate::domain::logging::LogComponent;
use crate::{log_error, log_info, log_warn};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

const COMPONENT: LogComponent = LogComponent::Domain("DataLoader");

/// In-memory price tables keyed by ticker, in load order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "IndexMap<String, PriceSeries>", into = "IndexMap<Ticker, PriceSeries>")]
pub struct DataLoader {
    data: IndexMap<Ticker, PriceSeries>,
    cache_data: bool,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new(true)
    }
}

impl DataLoader {
    pub fn new(cache_data: bool) -> Self {
        Self { data: IndexMap::new(), cache_data }
    }

    /// Concatenate record batches for one ticker, sort them by time and store
    /// the result. Returns whether a series is stored for the ticker afterwards.
    pub fn load_ticker(&mut self, ticker: &Ticker, batches: Vec<Vec<PricePoint>>) -> bool {
        if self.cache_data && self.data.contains_key(ticker) {
            log_info!(COMPONENT, "Data for {} is already loaded and cached.", ticker);
            return true;
        }

        log_info!(COMPONENT, "Loading data for {}...", ticker);
        let mut rows: Vec<PricePoint> = batches.into_iter().flatten().collect();
        rows.sort_by_key(|p| p.timestamp);

        let before = rows.len();
        rows.dedup_by_key(|p| p.timestamp);
        if rows.len() != before {
            log_warn!(
                COMPONENT,
                "Dropped {} rows with duplicate timestamps for {}.",
                before - rows.len(),
                ticker
            );
        }

        if rows.is_empty() {
            log_warn!(COMPONENT, "No data loaded for {}.", ticker);
            return false;
        }

        match PriceSeries::new(rows) {
            Ok(series) => {
                self.data.insert(ticker.clone(), series);
                log_info!(COMPONENT, "Data for {} loaded successfully.", ticker);
                true
            }
            Err(e) => {
                log_error!(COMPONENT, "Rejected data for {}: {}", ticker, e);
                false
            }
        }
    }

    /// Like [`DataLoader::load_ticker`] with each batch given as a JSON array
    /// of `{"datetime": .., "close": ..}` rows. Unreadable batches are logged
    /// and skipped.
    pub fn load_ticker_json(&mut self, ticker: &Ticker, sources: &[&str]) -> bool {
        let batches = sources
            .iter()
            .enumerate()
            .filter_map(|(i, src)| match serde_json::from_str::<Vec<PricePoint>>(src) {
                Ok(rows) => {
                    log_info!(COMPONENT, "Successfully read batch {} for {}", i, ticker);
                    Some(rows)
                }
                Err(e) => {
                    log_error!(COMPONENT, "Error reading batch {} for {}: {}", i, ticker, e);
                    None
                }
            })
            .collect();
        self.load_ticker(ticker, batches)
    }

    /// Store a ready-made series, replacing any previous one
    pub fn insert(&mut self, ticker: impl Into<Ticker>, series: PriceSeries) {
        self.data.insert(ticker.into(), series);
    }

    pub fn is_loaded(&self, ticker: &Ticker) -> bool {
        self.data.contains_key(ticker)
    }

    pub fn tickers(&self) -> impl Iterator<Item = &Ticker> {
        self.data.keys()
    }

    pub fn latest_price(&self, ticker: &Ticker) -> Option<Price> {
        self.data.get(ticker)?.last().map(|p| p.close)
    }

    /// Full history, or the last `lookback` rows of it
    pub fn price_history(&self, ticker: &Ticker, lookback: Option<usize>) -> Option<PriceSeries> {
        let series = self.data.get(ticker)?;
        Some(match lookback {
            Some(n) if n > 0 => series.tail(n),
            _ => series.clone(),
        })
    }
}

impl PriceTableRepository for DataLoader {
    fn price_table(&self, ticker: &Ticker) -> Option<&PriceSeries> {
        self.data.get(ticker)
    }
}

/// Keys are normalized to tickers; two keys naming the same ticker are rejected
impl TryFrom<IndexMap<String, PriceSeries>> for DataLoader {
    type Error = AppError;

    fn try_from(tables: IndexMap<String, PriceSeries>) -> Result<Self, Self::Error> {
        let mut data = IndexMap::with_capacity(tables.len());
        for (key, series) in tables {
            let ticker = Ticker::from(key.as_str());
            if data.contains_key(&ticker) {
                return Err(AppError::ValidationError(format!(
                    "price table key '{}' duplicates ticker {}",
                    key, ticker
                )));
            }
            data.insert(ticker, series);
        }
        Ok(Self { data, cache_data: true })
    }
}

impl From<DataLoader> for IndexMap<Ticker, PriceSeries> {
    fn from(loader: DataLoader) -> Self {
        loader.data
    }
}
