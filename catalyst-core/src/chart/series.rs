//! Price series adapter: price rows to paired candlestick / volume series.

use serde::Serialize;
use tracing::debug;

use crate::catalyst::LinearTimeAxis;
use crate::domain::{parse_instant, CandlestickPoint, PriceRow, VolumePoint};

/// Candlestick and volume series; element `i` of each shares one timestamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub candles: Vec<CandlestickPoint>,
    pub volume: Vec<VolumePoint>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Earliest and latest timestamp, for building the time axis.
    pub fn x_range(&self) -> Option<(i64, i64)> {
        let min = self.candles.iter().map(|c| c.timestamp_ms).min()?;
        let max = self.candles.iter().map(|c| c.timestamp_ms).max()?;
        Some((min, max))
    }

    pub fn up_count(&self) -> usize {
        self.candles.iter().filter(|c| c.is_up()).count()
    }

    /// Linear axis spanning the series across `[left_px, right_px]`.
    pub fn time_axis(&self, left_px: f64, right_px: f64) -> Option<LinearTimeAxis> {
        self.x_range()
            .map(|(min, max)| LinearTimeAxis::new(left_px, right_px, min, max))
    }
}

/// Convert rows in order. Rows without a parseable date or a close are dropped;
/// missing open/high/low fall back to the close and missing volume to zero.
pub fn to_chart_series(rows: &[PriceRow]) -> ChartSeries {
    let mut series = ChartSeries {
        candles: Vec::with_capacity(rows.len()),
        volume: Vec::with_capacity(rows.len()),
    };

    for row in rows {
        let Some(instant) = parse_instant(&row.date) else {
            debug!(date = %row.date, "skipping price row with unparseable date");
            continue;
        };
        let Some(close) = row.close.filter(|c| c.is_finite()) else {
            debug!(date = %row.date, "skipping price row without close");
            continue;
        };

        let timestamp_ms = instant.timestamp_millis();
        series.candles.push(CandlestickPoint {
            timestamp_ms,
            open: row.open.unwrap_or(close),
            high: row.high.unwrap_or(close),
            low: row.low.unwrap_or(close),
            close,
        });
        series.volume.push(VolumePoint {
            timestamp_ms,
            volume: row.volume.unwrap_or(0.0),
        });
    }

    series
}
