//! Build the configured price and article sources.

use std::sync::Arc;

use super::circuit_breaker::CircuitBreaker;
use super::feed::FeedClient;
use super::files::FileSource;
use super::provider::{ArticleSource, DataError, PriceSource};
use super::yahoo::YahooProvider;
use crate::config::{ArticleSourceKind, CatalystConfig, PriceSourceKind};

/// The pair of sources a paired fetch reads from.
pub struct SourceSet {
    pub prices: Box<dyn PriceSource>,
    pub articles: Box<dyn ArticleSource>,
}

impl SourceSet {
    /// Instantiate the sources named in the config. Network sources share
    /// one circuit breaker per upstream host.
    pub fn from_config(config: &CatalystConfig) -> Result<Self, DataError> {
        let feed_breaker = Arc::new(CircuitBreaker::default_provider());

        let prices: Box<dyn PriceSource> = match config.sources.prices {
            PriceSourceKind::Feed => {
                Box::new(FeedClient::from_config(&config.feed, feed_breaker.clone())?)
            }
            PriceSourceKind::Yahoo => Box::new(YahooProvider::new(
                &config.yahoo,
                Arc::new(CircuitBreaker::default_provider()),
            )?),
            PriceSourceKind::Files => Box::new(FileSource::new(&config.sources.data_dir)),
        };

        let articles: Box<dyn ArticleSource> = match config.sources.articles {
            ArticleSourceKind::Feed => {
                Box::new(FeedClient::from_config(&config.feed, feed_breaker)?)
            }
            ArticleSourceKind::Files => Box::new(FileSource::new(&config.sources.data_dir)),
        };

        Ok(Self { prices, articles })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_named_sources() {
        let mut config = CatalystConfig::default();
        config.sources.prices = PriceSourceKind::Yahoo;
        config.sources.articles = ArticleSourceKind::Files;

        let set = SourceSet::from_config(&config).unwrap();
        assert_eq!(set.prices.name(), "yahoo_finance");
        assert_eq!(set.articles.name(), "files");
    }

    #[test]
    fn default_is_feed_for_both() {
        let set = SourceSet::from_config(&CatalystConfig::default()).unwrap();
        assert_eq!(set.prices.name(), "feed");
        assert_eq!(set.articles.name(), "feed");
    }
}
