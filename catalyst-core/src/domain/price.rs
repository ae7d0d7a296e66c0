//! Price rows as delivered by the price-history feed, and the chart points built from them.

use serde::{Deserialize, Serialize};

/// One trading day of OHLCV data, keyed the way the price-history API emits it.
///
/// Only `Date` and `Close` are guaranteed; the other columns may be absent when
/// the upstream service returns closes only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Open", default)]
    pub open: Option<f64>,
    #[serde(rename = "High", default)]
    pub high: Option<f64>,
    #[serde(rename = "Low", default)]
    pub low: Option<f64>,
    #[serde(rename = "Close", default)]
    pub close: Option<f64>,
    #[serde(rename = "Volume", default)]
    pub volume: Option<f64>,
}

impl PriceRow {
    /// Fully populated row.
    pub fn ohlcv(
        date: impl Into<String>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            date: date.into(),
            open: Some(open),
            high: Some(high),
            low: Some(low),
            close: Some(close),
            volume: Some(volume),
        }
    }
}

/// Candlestick body for a single trading day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandlestickPoint {
    pub timestamp_ms: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl CandlestickPoint {
    pub fn is_up(&self) -> bool {
        self.close >= self.open
    }
}

/// Volume bar paired with a candlestick by timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumePoint {
    pub timestamp_ms: i64,
    pub volume: f64,
}
