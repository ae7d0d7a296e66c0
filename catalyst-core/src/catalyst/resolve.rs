//! Nearest-catalyst resolution for a timestamp on the chart's time axis.
//!
//! Linear scan over the catalyst days: O(days with catalysts) per query, which is
//! fine for one symbol's history (hundreds of days). An index would only pay off
//! if catalyst counts grew by orders of magnitude.

use serde::Serialize;

use super::aggregate::{CatalystDay, CatalystMap};
use crate::domain::{Article, DayKey, MS_PER_DAY};

/// One calendar day.
pub const DEFAULT_TOLERANCE_MS: u64 = MS_PER_DAY as u64;

/// Articles of the catalyst day nearest a query, or nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelectionResult {
    pub day: Option<DayKey>,
    pub distance_ms: Option<u64>,
    pub articles: Vec<Article>,
}

impl SelectionResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.day.is_none()
    }

    pub fn summaries(&self) -> impl Iterator<Item = &str> {
        self.articles.iter().map(|a| a.summary.as_str())
    }
}

/// Distance from `query_ms` to a catalyst day.
///
/// Measured to the day's UTC start, or to the closest article instant on that day
/// when one is nearer. Date-only articles sit on the day start, so for them both
/// measures agree.
pub fn day_distance(day: &CatalystDay, query_ms: i64) -> u64 {
    day.published_ms
        .iter()
        .map(|&ms| ms.abs_diff(query_ms))
        .fold(day.start_ms().abs_diff(query_ms), u64::min)
}

/// Closest catalyst day and its distance. Ties keep the first day in map order.
pub fn nearest_day(query_ms: i64, map: &CatalystMap) -> Option<(&CatalystDay, u64)> {
    let mut best: Option<(&CatalystDay, u64)> = None;
    for day in map {
        let distance = day_distance(day, query_ms);
        match best {
            Some((_, min)) if distance >= min => {}
            _ => best = Some((day, distance)),
        }
    }
    best
}

/// Select the articles of the nearest catalyst day strictly within `tolerance_ms`.
pub fn resolve(query_ms: i64, map: &CatalystMap, tolerance_ms: u64) -> SelectionResult {
    if map.is_empty() {
        return SelectionResult::empty();
    }
    match nearest_day(query_ms, map) {
        Some((day, distance)) if distance < tolerance_ms => SelectionResult {
            day: Some(day.key),
            distance_ms: Some(distance),
            articles: day.articles.clone(),
        },
        _ => SelectionResult::empty(),
    }
}

/// [`resolve`] with the one-day default tolerance.
pub fn resolve_default(query_ms: i64, map: &CatalystMap) -> SelectionResult {
    resolve(query_ms, map, DEFAULT_TOLERANCE_MS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalyst::aggregate;

    const HOUR: i64 = 3_600_000;

    fn key(s: &str) -> DayKey {
        s.parse().unwrap()
    }

    #[test]
    fn empty_map_selects_nothing() {
        assert!(resolve_default(0, &CatalystMap::new()).is_empty());
    }

    #[test]
    fn same_day_query_selects_that_day() {
        let map = aggregate(&[Article::new("2024-01-05", "a").with_summary("s")]);
        let sel = resolve_default(key("2024-01-05").start_ms() + 6 * HOUR, &map);
        assert_eq!(sel.day, Some(key("2024-01-05")));
        assert_eq!(sel.distance_ms, Some(6 * HOUR as u64));
        assert_eq!(sel.summaries().collect::<Vec<_>>(), vec!["s"]);
    }

    #[test]
    fn exactly_one_day_away_is_outside_tolerance() {
        let map = aggregate(&[Article::new("2024-01-05", "a")]);
        let sel = resolve_default(key("2024-01-06").start_ms(), &map);
        assert!(sel.is_empty());

        let just_inside = resolve_default(key("2024-01-06").start_ms() - 1, &map);
        assert_eq!(just_inside.day, Some(key("2024-01-05")));
    }

    #[test]
    fn picks_the_closest_of_several_days() {
        let map = aggregate(&[
            Article::new("2024-01-02", "far"),
            Article::new("2024-01-05", "near"),
            Article::new("2024-01-09", "farther"),
        ]);
        let sel = resolve_default(key("2024-01-05").start_ms() + 20 * HOUR, &map);
        assert_eq!(sel.day, Some(key("2024-01-05")));
        assert_eq!(sel.articles[0].title, "near");
    }

    #[test]
    fn ties_keep_first_in_map_order() {
        // Query at noon on the 4th: the 4th and 5th are both 12h away.
        let map = aggregate(&[
            Article::new("2024-01-05", "later day, seen first"),
            Article::new("2024-01-04", "earlier day, seen second"),
        ]);
        let query = key("2024-01-04").start_ms() + 12 * HOUR;
        let sel = resolve_default(query, &map);
        assert_eq!(sel.day, Some(key("2024-01-05")));
    }

    #[test]
    fn intraday_instant_shortens_the_distance() {
        let map = aggregate(&[Article::new("2024-01-05T23:50:00Z", "late")]);
        let query = key("2024-01-06").start_ms() + 10 * 60_000;
        let sel = resolve_default(query, &map);
        assert_eq!(sel.day, Some(key("2024-01-05")));
        assert_eq!(sel.distance_ms, Some(20 * 60_000));
    }

    #[test]
    fn custom_tolerance_is_honoured() {
        let map = aggregate(&[Article::new("2024-01-05", "a")]);
        let query = key("2024-01-05").start_ms() + 3 * HOUR;
        assert!(resolve(query, &map, 2 * HOUR as u64).is_empty());
        assert!(!resolve(query, &map, 4 * HOUR as u64).is_empty());
        assert!(resolve(key("2024-01-05").start_ms(), &map, 0).is_empty());
    }

    #[test]
    fn resolution_is_repeatable() {
        let map = aggregate(&[
            Article::new("2024-01-05", "a"),
            Article::new("2024-01-06", "b"),
        ]);
        let q = key("2024-01-05").start_ms() + 11 * HOUR;
        assert_eq!(resolve_default(q, &map), resolve_default(q, &map));
    }

    #[test]
    fn late_article_beats_next_day_start_across_midnight() {
        let map = aggregate(&[
            Article::new("2024-01-05T23:50:00Z", "late"),
            Article::new("2024-01-07", "next"),
        ]);
        // 11:10 after the 23:50 article, 13:00 before 01-07 starts.
        let q = key("2024-01-06").start_ms() + 11 * HOUR;
        let next = map.get(&key("2024-01-07")).unwrap();
        assert_eq!(day_distance(next, q), 46_800_000);

        let sel = resolve(q, &map, DEFAULT_TOLERANCE_MS);
        assert_eq!(sel.day, Some(key("2024-01-05")));
        assert_eq!(sel.distance_ms, Some(40_200_000));
    }
}
