//! Application state: the current symbol, chart snapshot, selection, and notifications.
//!
//! The state owns at most one [`ChartSnapshot`] and the current selection. A fetch
//! either replaces the snapshot wholesale or leaves it untouched; a click always
//! replaces the selection.

use chrono::{NaiveDateTime, Utc};
use tracing::warn;

use crate::catalyst::{resolve, select_at_pixel, SelectionResult, TimeAxis, DEFAULT_TOLERANCE_MS};
use crate::chart::ChartSnapshot;
use crate::data::{fetch_symbol, ArticleSource, FetchError, FetchedData, PriceSource};

/// The one message users see for any fetch failure.
pub const FETCH_ERROR_MESSAGE: &str = "Error fetching data";

/// A user-facing notification, with the underlying cause kept for diagnostics.
#[derive(Debug, Clone)]
pub struct Notification {
    pub timestamp: NaiveDateTime,
    pub message: String,
    pub detail: String,
}

/// What a refresh did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// No symbol entered; nothing was requested.
    Skipped,
    /// Snapshot replaced.
    Updated,
    /// Fetch failed; snapshot kept, notification pushed.
    Failed,
}

#[derive(Debug)]
pub struct AppState {
    pub symbol_input: String,
    pub snapshot: Option<ChartSnapshot>,
    pub selection: SelectionResult,
    pub notifications: Vec<Notification>,
    pub tolerance_ms: u64,
    /// Set while a paired fetch is in flight.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE_MS)
    }
}

impl AppState {
    pub fn new(tolerance_ms: u64) -> Self {
        Self {
            symbol_input: String::new(),
            snapshot: None,
            selection: SelectionResult::empty(),
            notifications: Vec::new(),
            tolerance_ms,
            loading: false,
        }
    }

    pub fn set_symbol(&mut self, symbol: impl Into<String>) {
        self.symbol_input = symbol.into();
    }

    /// Set the symbol, fetch it, and apply the result.
    pub fn refresh(
        &mut self,
        symbol: &str,
        prices: &dyn PriceSource,
        articles: &dyn ArticleSource,
    ) -> RefreshOutcome {
        self.set_symbol(symbol);
        self.loading = true;
        let result = fetch_symbol(prices, articles, &self.symbol_input);
        self.apply_fetch(result)
    }

    /// Apply a paired-fetch result.
    pub fn apply_fetch(&mut self, result: Result<FetchedData, FetchError>) -> RefreshOutcome {
        self.loading = false;
        match result {
            Ok(data) => {
                self.snapshot = Some(ChartSnapshot::build(&data));
                self.selection = SelectionResult::empty();
                RefreshOutcome::Updated
            }
            Err(FetchError::EmptySymbol) => RefreshOutcome::Skipped,
            Err(err) => {
                warn!(error = %err, "fetch failed; keeping previous chart");
                self.push_error(FETCH_ERROR_MESSAGE, err.to_string());
                RefreshOutcome::Failed
            }
        }
    }

    /// Resolve a pointer click on the chart's time axis.
    pub fn click<A: TimeAxis + ?Sized>(&mut self, pixel_x: f64, axis: &A) -> &SelectionResult {
        self.selection = match &self.snapshot {
            Some(snap) => select_at_pixel(pixel_x, axis, &snap.catalysts, self.tolerance_ms),
            None => SelectionResult::empty(),
        };
        &self.selection
    }

    /// Select the catalyst nearest a timestamp.
    pub fn select_at(&mut self, query_ms: i64) -> &SelectionResult {
        self.selection = match &self.snapshot {
            Some(snap) => resolve(query_ms, &snap.catalysts, self.tolerance_ms),
            None => SelectionResult::empty(),
        };
        &self.selection
    }

    /// Tooltip footer for the chart x-value under the pointer.
    pub fn tooltip_at(&self, x_ms: i64) -> Option<&str> {
        self.snapshot
            .as_ref()
            .and_then(|snap| snap.annotations.tooltips.footer_at(x_ms))
    }

    pub fn push_error(&mut self, message: impl Into<String>, detail: impl Into<String>) {
        self.notifications.push(Notification {
            timestamp: Utc::now().naive_utc(),
            message: message.into(),
            detail: detail.into(),
        });
    }

    pub fn last_notification(&self) -> Option<&Notification> {
        self.notifications.last()
    }
}
