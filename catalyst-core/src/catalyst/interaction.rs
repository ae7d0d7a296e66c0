//! Pointer interaction boundary: pixel on the chart's x-axis → query timestamp.
//!
//! The renderer owns the axis; this module only needs its plotted pixel range and
//! its pixel→value mapping. A click outside the plotted range, or one the axis
//! cannot map to a valid instant, produces no query at all.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::aggregate::CatalystMap;
use super::resolve::{resolve, SelectionResult};

/// What the chart renderer exposes about its time axis.
pub trait TimeAxis {
    /// Left edge of the plotted area in pixels.
    fn left(&self) -> f64;

    /// Right edge of the plotted area in pixels.
    fn right(&self) -> f64;

    /// Axis value (epoch milliseconds) under a pixel, if the axis can map it.
    fn value_for_pixel(&self, pixel: f64) -> Option<f64>;
}

/// Linear time axis spanning `[min_ms, max_ms]` across `[left_px, right_px]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearTimeAxis {
    pub left_px: f64,
    pub right_px: f64,
    pub min_ms: i64,
    pub max_ms: i64,
}

impl LinearTimeAxis {
    pub fn new(left_px: f64, right_px: f64, min_ms: i64, max_ms: i64) -> Self {
        Self {
            left_px,
            right_px,
            min_ms,
            max_ms,
        }
    }
}

impl TimeAxis for LinearTimeAxis {
    fn left(&self) -> f64 {
        self.left_px
    }

    fn right(&self) -> f64 {
        self.right_px
    }

    fn value_for_pixel(&self, pixel: f64) -> Option<f64> {
        let width = self.right_px - self.left_px;
        if !width.is_finite() || width <= 0.0 {
            return None;
        }
        let frac = (pixel - self.left_px) / width;
        let span = self.max_ms as f64 - self.min_ms as f64;
        Some(self.min_ms as f64 + frac * span)
    }
}

/// Convert a click position into a query timestamp.
///
/// `None` when the pixel lies outside the inclusive plotted range, or the axis
/// value is missing, NaN, or not a representable instant.
pub fn query_timestamp<A: TimeAxis + ?Sized>(pixel_x: f64, axis: &A) -> Option<i64> {
    if !pixel_x.is_finite() || pixel_x < axis.left() || pixel_x > axis.right() {
        return None;
    }
    let value = axis.value_for_pixel(pixel_x)?;
    if !value.is_finite() {
        return None;
    }
    let ms = value.round();
    if ms < i64::MIN as f64 || ms > i64::MAX as f64 {
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis(ms as i64).map(|dt| dt.timestamp_millis())
}

/// Resolve a click directly; rejected clicks yield an empty selection without a scan.
pub fn select_at_pixel<A: TimeAxis + ?Sized>(
    pixel_x: f64,
    axis: &A,
    map: &CatalystMap,
    tolerance_ms: u64,
) -> SelectionResult {
    match query_timestamp(pixel_x, axis) {
        Some(ms) => resolve(ms, map, tolerance_ms),
        None => SelectionResult::empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalyst::{aggregate, DEFAULT_TOLERANCE_MS};
    use crate::domain::{Article, DayKey, MS_PER_DAY};

    fn key(s: &str) -> DayKey {
        s.parse().unwrap()
    }

    fn ten_day_axis() -> LinearTimeAxis {
        let start = key("2024-01-01").start_ms();
        LinearTimeAxis::new(50.0, 950.0, start, start + 9 * MS_PER_DAY)
    }

    /// Axis whose mapping always fails, like a renderer without a scale yet.
    struct BrokenAxis;

    impl TimeAxis for BrokenAxis {
        fn left(&self) -> f64 {
            0.0
        }
        fn right(&self) -> f64 {
            100.0
        }
        fn value_for_pixel(&self, _pixel: f64) -> Option<f64> {
            Some(f64::NAN)
        }
    }

    #[test]
    fn edges_map_to_axis_bounds() {
        let axis = ten_day_axis();
        assert_eq!(query_timestamp(50.0, &axis), Some(axis.min_ms));
        assert_eq!(query_timestamp(950.0, &axis), Some(axis.max_ms));
    }

    #[test]
    fn middle_pixel_maps_linearly() {
        let axis = ten_day_axis();
        // 900px across 9 days: 100px per day
        assert_eq!(query_timestamp(450.0, &axis), Some(key("2024-01-05").start_ms()));
    }

    #[test]
    fn outside_plot_area_is_no_query() {
        let axis = ten_day_axis();
        assert_eq!(query_timestamp(49.9, &axis), None);
        assert_eq!(query_timestamp(950.1, &axis), None);
        assert_eq!(query_timestamp(f64::NAN, &axis), None);
    }

    #[test]
    fn nan_axis_value_is_no_query() {
        assert_eq!(query_timestamp(10.0, &BrokenAxis), None);
    }

    #[test]
    fn degenerate_axis_is_no_query() {
        let axis = LinearTimeAxis::new(100.0, 100.0, 0, MS_PER_DAY);
        assert_eq!(query_timestamp(100.0, &axis), None);
    }

    #[test]
    fn unrepresentable_instant_is_no_query() {
        let axis = LinearTimeAxis::new(0.0, 1.0, 0, i64::MAX);
        assert_eq!(query_timestamp(1.0, &axis), None);
    }

    #[test]
    fn axis_span_wider_than_i64_is_no_query() {
        let axis = LinearTimeAxis::new(0.0, 1.0, -1, i64::MAX);
        assert_eq!(query_timestamp(0.5, &axis), None);

        let axis = LinearTimeAxis::new(0.0, 1.0, i64::MIN, i64::MAX);
        assert_eq!(query_timestamp(0.5, &axis), Some(0));
    }

    #[test]
    fn click_on_marker_selects_articles() {
        let map = aggregate(&[Article::new("2024-01-05", "catalyst")]);
        let sel = select_at_pixel(450.0, &ten_day_axis(), &map, DEFAULT_TOLERANCE_MS);
        assert_eq!(sel.day, Some(key("2024-01-05")));
    }

    #[test]
    fn click_outside_selects_nothing() {
        let map = aggregate(&[Article::new("2024-01-01", "catalyst")]);
        let sel = select_at_pixel(10.0, &ten_day_axis(), &map, DEFAULT_TOLERANCE_MS);
        assert!(sel.is_empty());
    }
}
