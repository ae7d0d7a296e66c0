//! Paired fetch: price rows and articles requested together, succeeding as a unit.

use thiserror::Error;
use tracing::{info, warn};

use super::provider::{ArticleSource, DataError, PriceSource};
use crate::domain::{Article, PriceRow, Symbol};

/// Raw rows from one successful paired fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedData {
    pub symbol: Symbol,
    pub prices: Vec<PriceRow>,
    pub articles: Vec<Article>,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("no symbol given")]
    EmptySymbol,

    #[error("price history for {symbol}: {source}")]
    Prices { symbol: Symbol, source: DataError },

    #[error("articles for {symbol}: {source}")]
    Articles { symbol: Symbol, source: DataError },
}

/// Trim and upper-case a symbol; `None` if nothing is left.
pub fn normalize_symbol(symbol: &str) -> Option<Symbol> {
    let symbol = symbol.trim();
    if symbol.is_empty() {
        None
    } else {
        Some(symbol.to_uppercase())
    }
}

/// Issue both requests concurrently and wait for both.
///
/// If either fails the whole fetch fails; no partial data is returned. When both
/// fail, the price error is reported.
pub fn fetch_symbol(
    prices: &dyn PriceSource,
    articles: &dyn ArticleSource,
    symbol: &str,
) -> Result<FetchedData, FetchError> {
    let symbol = normalize_symbol(symbol).ok_or(FetchError::EmptySymbol)?;
    info!(
        %symbol,
        prices = prices.name(),
        articles = articles.name(),
        "fetching price history and articles"
    );

    let (price_result, article_result) = rayon::join(
        || prices.fetch_prices(&symbol),
        || articles.fetch_articles(&symbol),
    );

    let price_rows = price_result.map_err(|source| {
        warn!(%symbol, error = %source, "price history fetch failed");
        FetchError::Prices {
            symbol: symbol.clone(),
            source,
        }
    })?;
    let article_rows = article_result.map_err(|source| {
        warn!(%symbol, error = %source, "article fetch failed");
        FetchError::Articles {
            symbol: symbol.clone(),
            source,
        }
    })?;

    info!(
        %symbol,
        price_rows = price_rows.len(),
        articles = article_rows.len(),
        "fetch complete"
    );

    Ok(FetchedData {
        symbol,
        prices: price_rows,
        articles: article_rows,
    })
}
