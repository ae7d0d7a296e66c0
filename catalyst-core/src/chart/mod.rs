//! Chart-facing outputs: price/volume series and the per-fetch snapshot

pub mod series;
pub mod snapshot;

pub use series::{to_chart_series, ChartSeries};
pub use snapshot::ChartSnapshot;
