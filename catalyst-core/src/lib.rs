//! Catalyst Core: price history and news catalysts for one ticker symbol.
//!
//! This crate contains:
//! - Domain types (price rows, articles, calendar day keys)
//! - Article aggregation into per-day catalysts
//! - Sentiment color tiers, chart annotations, tooltip footers
//! - Nearest-catalyst resolution for chart clicks
//! - Price/volume series for candlestick rendering
//! - Data sources (JSON feed, Yahoo Finance, local files) and the paired fetch
//! - TOML configuration and application state

pub mod catalyst;
pub mod chart;
pub mod config;
pub mod data;
pub mod domain;
pub mod state;

pub use catalyst::{
    aggregate, build_annotations, classify, resolve, select_at_pixel, CatalystDay, CatalystMap,
    ColorTier, SelectionResult, DEFAULT_TOLERANCE_MS,
};
pub use chart::{to_chart_series, ChartSeries, ChartSnapshot};
pub use config::{CatalystConfig, ConfigError};
pub use data::{fetch_symbol, DataError, FetchError, FetchedData, SourceSet};
pub use domain::{Article, DayKey, PriceRow};
pub use state::{AppState, RefreshOutcome, FETCH_ERROR_MESSAGE};
