//! JSON feed client for the price-history and article endpoints.
//!
//! Endpoints, symbol upper-cased:
//! - `GET {base_url}/api/price-history/{SYMBOL}` → `[{"Date", "Open", ..., "Volume"}]`
//! - `GET {base_url}/api/articles/{SYMBOL}` → `[{"date", "title", ..., "sentiment"}]`
//!
//! Transport errors and 5xx/429 responses are retried with exponential backoff and
//! count against the circuit breaker. Any other non-success status, or a body that
//! is not the expected JSON array, fails the request at once.

use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::circuit_breaker::CircuitBreaker;
use super::provider::{ArticleSource, DataError, PriceSource};
use crate::config::FeedConfig;
use crate::domain::{Article, PriceRow};

pub struct FeedClient {
    client: reqwest::blocking::Client,
    base_url: String,
    circuit_breaker: Arc<CircuitBreaker>,
    max_retries: u32,
    base_delay: Duration,
}

impl FeedClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        max_retries: u32,
        circuit_breaker: Arc<CircuitBreaker>,
    ) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DataError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            circuit_breaker,
            max_retries,
            base_delay: Duration::from_millis(250),
        })
    }

    pub fn from_config(
        config: &FeedConfig,
        circuit_breaker: Arc<CircuitBreaker>,
    ) -> Result<Self, DataError> {
        Self::new(
            config.base_url.clone(),
            Duration::from_secs(config.timeout_secs),
            config.max_retries,
            circuit_breaker,
        )
    }

    pub fn price_history_url(&self, symbol: &str) -> String {
        format!("{}/api/price-history/{}", self.base_url, symbol.to_uppercase())
    }

    pub fn articles_url(&self, symbol: &str) -> String {
        format!("{}/api/articles/{}", self.base_url, symbol.to_uppercase())
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, DataError> {
        if !self.circuit_breaker.is_allowed() {
            warn!(
                url,
                cooldown = ?self.circuit_breaker.remaining_cooldown(),
                "feed circuit breaker open"
            );
            return Err(DataError::CircuitBreakerTripped);
        }

        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.base_delay * 2u32.pow(attempt - 1);
                debug!(url, attempt, ?delay, "retrying feed request");
                std::thread::sleep(delay);
            }

            match self.client.get(url).send() {
                Ok(resp) => {
                    let status = resp.status();

                    if status.is_server_error()
                        || status == reqwest::StatusCode::TOO_MANY_REQUESTS
                    {
                        self.circuit_breaker.record_failure();
                        last_error = Some(DataError::HttpStatus {
                            status: status.as_u16(),
                            url: url.to_string(),
                        });
                        if !self.circuit_breaker.is_allowed() {
                            break;
                        }
                        continue;
                    }

                    if !status.is_success() {
                        return Err(DataError::HttpStatus {
                            status: status.as_u16(),
                            url: url.to_string(),
                        });
                    }

                    let body = resp.json::<T>().map_err(|e| {
                        DataError::ResponseFormatChanged(format!("failed to parse {url}: {e}"))
                    })?;
                    self.circuit_breaker.record_success();
                    return Ok(body);
                }
                Err(e) if e.is_connect() || e.is_timeout() => {
                    warn!(url, error = %e, "feed request failed");
                    last_error = Some(DataError::NetworkUnreachable(e.to_string()));
                }
                Err(e) => return Err(DataError::NetworkUnreachable(e.to_string())),
            }
        }

        Err(last_error.unwrap_or_else(|| DataError::Other("max retries exceeded".into())))
    }
}

impl PriceSource for FeedClient {
    fn name(&self) -> &str {
        "feed"
    }

    fn fetch_prices(&self, symbol: &str) -> Result<Vec<PriceRow>, DataError> {
        self.get_json(&self.price_history_url(symbol))
    }
}

impl ArticleSource for FeedClient {
    fn name(&self) -> &str {
        "feed"
    }

    fn fetch_articles(&self, symbol: &str) -> Result<Vec<Article>, DataError> {
        self.get_json(&self.articles_url(symbol))
    }
}
