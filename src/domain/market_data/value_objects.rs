use chrono::{DateTime, NaiveDateTime, Utc};
use derive_more::{Constructor, Deref, Display, From, Into};
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use strum::{AsRefStr, EnumIter, EnumString};

/// Value Object - closing price
#[derive(Debug, Clone, Copy, PartialEq, From, Into, Deref, Constructor, Serialize, Deserialize)]
pub struct Price(f64);

impl Price {
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

/// Value Object - epoch milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into, Deref, Constructor, Serialize)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64
    }

    pub fn from_millis(value: i64) -> Self {
        Self(value)
    }

    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }

    /// Parse a text timestamp as found in exported price tables.
    ///
    /// Accepts RFC 3339 and the naive `YYYY-MM-DD HH:MM:SS` /
    /// `YYYY-MM-DDTHH:MM:SS` forms (treated as UTC) and bare dates.
    pub fn parse(text: &str) -> Result<Self, String> {
        let text = text.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Ok(Self(dt.timestamp_millis()));
        }
        for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
                return Ok(Self(naive.and_utc().timestamp_millis()));
            }
        }
        if let Ok(date) = chrono::NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            if let Some(naive) = date.and_hms_opt(0, 0, 0) {
                return Ok(Self(naive.and_utc().timestamp_millis()));
            }
        }
        Err(format!("unrecognised timestamp '{}'", text))
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawTimestamp {
            Millis(i64),
            Text(String),
        }

        match RawTimestamp::deserialize(deserializer)? {
            RawTimestamp::Millis(ms) => Ok(Timestamp(ms)),
            RawTimestamp::Text(text) => Timestamp::parse(&text).map_err(serde::de::Error::custom),
        }
    }
}

/// Value Object - ticker symbol
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deref, Display, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    pub fn new(ticker: String) -> Result<Self, String> {
        if ticker.trim().is_empty() {
            return Err("Ticker cannot be empty".to_string());
        }
        Ok(Self::from(ticker.as_str()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Ticker {
    fn from(value: &str) -> Self {
        Self(value.trim().to_uppercase())
    }
}

impl From<String> for Ticker {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<Ticker> for String {
    fn from(value: Ticker) -> Self {
        value.0
    }
}

/// Value Object - trade direction of a signal or a fill
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, AsRefStr, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(ascii_case_insensitive)]
pub enum SignalKind {
    #[display(fmt = "BUY")]
    #[strum(serialize = "BUY")]
    #[serde(alias = "buy", alias = "Buy")]
    Buy,
    #[display(fmt = "SELL")]
    #[strum(serialize = "SELL")]
    #[serde(alias = "sell", alias = "Sell")]
    Sell,
}

impl SignalKind {
    pub fn is_buy(&self) -> bool {
        matches!(self, SignalKind::Buy)
    }
}
