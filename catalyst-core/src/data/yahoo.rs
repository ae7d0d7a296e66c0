//! Yahoo Finance price source.
//!
//! Fetches daily OHLCV rows from Yahoo's v8 chart API over a lookback range
//! (`1y` by default). Handles retries with exponential backoff, response parsing,
//! and the circuit breaker.
//!
//! Yahoo Finance has no official API and is subject to unannounced format changes.
//! The feed and file sources remain available when Yahoo is not.

use chrono::DateTime;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::circuit_breaker::CircuitBreaker;
use super::provider::{DataError, PriceSource};
use crate::config::YahooConfig;
use crate::domain::PriceRow;

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<f64>>,
}

pub struct YahooProvider {
    client: reqwest::blocking::Client,
    circuit_breaker: Arc<CircuitBreaker>,
    range: String,
    max_retries: u32,
    base_delay: Duration,
}

impl YahooProvider {
    pub fn new(
        config: &YahooConfig,
        circuit_breaker: Arc<CircuitBreaker>,
    ) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .map_err(|e| DataError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            circuit_breaker,
            range: config.range.clone(),
            max_retries: config.max_retries,
            base_delay: Duration::from_millis(500),
        })
    }

    fn chart_url(&self, symbol: &str) -> String {
        format!(
            "https://query2.finance.yahoo.com/v8/finance/chart/{}?range={}&interval=1d",
            symbol.to_uppercase(),
            self.range
        )
    }

    /// Parse the chart API response into price rows dated `YYYY-MM-DD` (UTC).
    fn parse_response(symbol: &str, resp: ChartResponse) -> Result<Vec<PriceRow>, DataError> {
        let result = resp.chart.result.ok_or_else(|| match resp.chart.error {
            Some(err) if err.code == "Not Found" => DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            },
            Some(err) => {
                DataError::ResponseFormatChanged(format!("{}: {}", err.code, err.description))
            }
            None => DataError::ResponseFormatChanged("empty result with no error".into()),
        })?;

        let data = result
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("result array is empty".into()))?;

        let timestamps = data
            .timestamp
            .ok_or_else(|| DataError::ResponseFormatChanged("no timestamps".into()))?;

        let quote = data
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("no quote data".into()))?;

        let mut rows = Vec::with_capacity(timestamps.len());
        for (i, &ts) in timestamps.iter().enumerate() {
            let date = DateTime::from_timestamp(ts, 0)
                .map(|dt| dt.date_naive())
                .ok_or_else(|| {
                    DataError::ResponseFormatChanged(format!("invalid timestamp: {ts}"))
                })?;

            let row = PriceRow {
                date: date.format("%Y-%m-%d").to_string(),
                open: quote.open.get(i).copied().flatten(),
                high: quote.high.get(i).copied().flatten(),
                low: quote.low.get(i).copied().flatten(),
                close: quote.close.get(i).copied().flatten(),
                volume: quote.volume.get(i).copied().flatten(),
            };

            // Holidays come back with every column null
            if row.close.is_none() && row.open.is_none() && row.volume.is_none() {
                continue;
            }
            rows.push(row);
        }

        if rows.is_empty() {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }

        Ok(rows)
    }

    fn fetch_with_retry(&self, symbol: &str) -> Result<Vec<PriceRow>, DataError> {
        if !self.circuit_breaker.is_allowed() {
            warn!(
                symbol,
                cooldown = ?self.circuit_breaker.remaining_cooldown(),
                "yahoo circuit breaker open"
            );
            return Err(DataError::CircuitBreakerTripped);
        }

        let url = self.chart_url(symbol);
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.base_delay * 2u32.pow(attempt - 1);
                debug!(symbol, attempt, ?delay, "retrying yahoo request");
                std::thread::sleep(delay);
            }

            if !self.circuit_breaker.is_allowed() {
                return Err(DataError::CircuitBreakerTripped);
            }

            match self.client.get(&url).send() {
                Ok(resp) => {
                    let status = resp.status();

                    if status == reqwest::StatusCode::FORBIDDEN {
                        // IP ban
                        self.circuit_breaker.trip();
                        return Err(DataError::CircuitBreakerTripped);
                    }

                    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        self.circuit_breaker.record_failure();
                        let retry_after = resp
                            .headers()
                            .get("retry-after")
                            .and_then(|v| v.to_str().ok())
                            .and_then(|v| v.parse::<u64>().ok())
                            .unwrap_or(60);
                        last_error = Some(DataError::RateLimited {
                            retry_after_secs: retry_after,
                        });
                        continue;
                    }

                    if !status.is_success() {
                        self.circuit_breaker.record_failure();
                        last_error = Some(DataError::HttpStatus {
                            status: status.as_u16(),
                            url: url.clone(),
                        });
                        continue;
                    }

                    let chart: ChartResponse = resp.json().map_err(|e| {
                        DataError::ResponseFormatChanged(format!(
                            "failed to parse response for {symbol}: {e}"
                        ))
                    })?;

                    let rows = Self::parse_response(symbol, chart)?;
                    self.circuit_breaker.record_success();
                    return Ok(rows);
                }
                Err(e) if e.is_connect() || e.is_timeout() => {
                    warn!(symbol, error = %e, "yahoo request failed");
                    last_error = Some(DataError::NetworkUnreachable(e.to_string()));
                }
                Err(e) => return Err(DataError::NetworkUnreachable(e.to_string())),
            }
        }

        Err(last_error.unwrap_or_else(|| DataError::Other("max retries exceeded".into())))
    }
}

impl PriceSource for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn fetch_prices(&self, symbol: &str) -> Result<Vec<PriceRow>, DataError> {
        self.fetch_with_retry(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Vec<PriceRow>, DataError> {
        let resp: ChartResponse = serde_json::from_str(json).unwrap();
        YahooProvider::parse_response("CAPR", resp)
    }

    #[test]
    fn parses_rows_and_skips_holidays() {
        // 2024-01-02, 2024-01-03, 2024-01-04 at 14:30 UTC
        let json = r#"{"chart": {"result": [{
            "timestamp": [1704205800, 1704292200, 1704378600],
            "indicators": {"quote": [{
                "open":   [1.0, null, 1.2],
                "high":   [1.1, null, 1.3],
                "low":    [0.9, null, 1.1],
                "close":  [1.05, null, 1.25],
                "volume": [1000, null, 3000]
            }]}
        }], "error": null}}"#;
        let rows = parse(json).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], PriceRow::ohlcv("2024-01-02", 1.0, 1.1, 0.9, 1.05, 1000.0));
        assert_eq!(rows[1].date, "2024-01-04");
    }

    #[test]
    fn not_found_maps_to_symbol_error() {
        let json = r#"{"chart": {"result": null,
            "error": {"code": "Not Found", "description": "No data found"}}}"#;
        assert!(matches!(parse(json), Err(DataError::SymbolNotFound { .. })));
    }

    #[test]
    fn other_errors_are_format_changes() {
        let json = r#"{"chart": {"result": null, "error": null}}"#;
        assert!(matches!(parse(json), Err(DataError::ResponseFormatChanged(_))));
    }

    #[test]
    fn chart_url_uses_range() {
        let provider = YahooProvider::new(
            &YahooConfig::default(),
            Arc::new(CircuitBreaker::default_provider()),
        )
        .unwrap();
        assert_eq!(
            provider.chart_url("capr"),
            "https://query2.finance.yahoo.com/v8/finance/chart/CAPR?range=1y&interval=1d"
        );
    }
}
