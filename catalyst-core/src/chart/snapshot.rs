//! ChartSnapshot: everything derived from one successful fetch.
//!
//! A snapshot is built once and never mutated; a new fetch builds a new snapshot
//! that replaces the old one wholesale.

use serde::Serialize;

use super::series::{to_chart_series, ChartSeries};
use crate::catalyst::{aggregate_with_report, build_annotations, AnnotationSet, CatalystMap};
use crate::data::FetchedData;
use crate::domain::Symbol;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSnapshot {
    pub symbol: Symbol,
    pub series: ChartSeries,
    pub catalysts: CatalystMap,
    pub annotations: AnnotationSet,
    /// Articles left off the chart because their date could not be parsed.
    pub dropped_articles: usize,
}

impl ChartSnapshot {
    pub fn build(data: &FetchedData) -> Self {
        let series = to_chart_series(&data.prices);
        let aggregation = aggregate_with_report(&data.articles);
        let annotations = build_annotations(&aggregation.map);
        Self {
            symbol: data.symbol.clone(),
            series,
            catalysts: aggregation.map,
            annotations,
            dropped_articles: aggregation.dropped,
        }
    }

    pub fn title(&self) -> String {
        format!("{} Candlestick Chart", self.symbol)
    }

    pub fn price_label(&self) -> String {
        format!("{} Price", self.symbol)
    }

    pub fn volume_label(&self) -> String {
        format!("{} Volume", self.symbol)
    }
}
