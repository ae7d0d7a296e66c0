//! Data sources and the paired fetch

pub mod circuit_breaker;
pub mod feed;
pub mod fetch;
pub mod files;
pub mod provider;
pub mod sources;
pub mod yahoo;

pub use circuit_breaker::CircuitBreaker;
pub use feed::FeedClient;
pub use fetch::{fetch_symbol, normalize_symbol, FetchError, FetchedData};
pub use files::FileSource;
pub use provider::{ArticleSource, DataError, PriceSource};
pub use sources::SourceSet;
pub use yahoo::YahooProvider;
