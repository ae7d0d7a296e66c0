//! Source traits and structured error types for the fetch boundary.
//!
//! `PriceSource` and `ArticleSource` abstract over where data comes from (the JSON
//! feed, Yahoo Finance, local fixture files) so implementations can be swapped and
//! mocked in tests. Sources only fetch; aggregation happens above them.

use thiserror::Error;

use crate::domain::{Article, PriceRow};

/// Structured error types for data operations.
///
/// These are designed to be displayable in CLI output and notifications.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("hard stop: data provider has blocked requests (circuit breaker tripped)")]
    CircuitBreakerTripped,

    #[error("I/O error reading {path}: {message}")]
    Io { path: String, message: String },

    #[error("data error: {0}")]
    Other(String),
}

/// Source of daily price rows for a symbol.
pub trait PriceSource: Send + Sync {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    /// Fetch the symbol's price history, chronologically ordered.
    fn fetch_prices(&self, symbol: &str) -> Result<Vec<PriceRow>, DataError>;
}

/// Source of news articles for a symbol.
pub trait ArticleSource: Send + Sync {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    /// Fetch every known article for the symbol, in any order.
    fn fetch_articles(&self, symbol: &str) -> Result<Vec<Article>, DataError>;
}
