//! Article aggregation: group articles into per-day catalysts.
//!
//! The result is an explicitly ordered map: days iterate in the order they were
//! first seen in the input, and within a day every article keeps its arrival
//! position. Nothing is deduplicated.

use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use crate::domain::{Article, DayKey};

/// Everything known about one day that has at least one article.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalystDay {
    pub key: DayKey,
    pub sentiments: Vec<Option<String>>,
    pub titles: Vec<String>,
    pub articles: Vec<Article>,
    /// Publication instant of each article (epoch ms), parallel to `articles`.
    pub published_ms: Vec<i64>,
}

impl CatalystDay {
    fn new(key: DayKey) -> Self {
        Self {
            key,
            sentiments: Vec::new(),
            titles: Vec::new(),
            articles: Vec::new(),
            published_ms: Vec::new(),
        }
    }

    fn push(&mut self, article: &Article, published_ms: i64) {
        self.sentiments.push(article.sentiment.clone());
        self.titles.push(article.title.clone());
        self.articles.push(article.clone());
        self.published_ms.push(published_ms);
    }

    /// Epoch milliseconds of the day's UTC start.
    pub fn start_ms(&self) -> i64 {
        self.key.start_ms()
    }

    pub fn article_count(&self) -> usize {
        self.articles.len()
    }
}

/// Ordered mapping from day to catalyst.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatalystMap {
    days: Vec<CatalystDay>,
    #[serde(skip)]
    index: HashMap<DayKey, usize>,
}

impl CatalystMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn get(&self, key: &DayKey) -> Option<&CatalystDay> {
        self.index.get(key).map(|&i| &self.days[i])
    }

    pub fn contains(&self, key: &DayKey) -> bool {
        self.index.contains_key(key)
    }

    /// Days in first-seen order.
    pub fn iter(&self) -> std::slice::Iter<'_, CatalystDay> {
        self.days.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = DayKey> + '_ {
        self.days.iter().map(|d| d.key)
    }

    /// Total number of articles across all days.
    pub fn article_count(&self) -> usize {
        self.days.iter().map(CatalystDay::article_count).sum()
    }

    fn day_mut(&mut self, key: DayKey) -> &mut CatalystDay {
        let i = match self.index.get(&key) {
            Some(&i) => i,
            None => {
                self.days.push(CatalystDay::new(key));
                let i = self.days.len() - 1;
                self.index.insert(key, i);
                i
            }
        };
        &mut self.days[i]
    }
}

impl<'a> IntoIterator for &'a CatalystMap {
    type Item = &'a CatalystDay;
    type IntoIter = std::slice::Iter<'a, CatalystDay>;

    fn into_iter(self) -> Self::IntoIter {
        self.days.iter()
    }
}

/// Aggregation output with the number of articles that could not be dated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    pub map: CatalystMap,
    pub dropped: usize,
}

/// Group articles by UTC day. Articles without a parseable date are skipped.
pub fn aggregate(articles: &[Article]) -> CatalystMap {
    aggregate_with_report(articles).map
}

/// Like [`aggregate`], also reporting how many articles were skipped.
pub fn aggregate_with_report(articles: &[Article]) -> Aggregation {
    let mut map = CatalystMap::new();
    let mut dropped = 0;

    for article in articles {
        let Some(published) = article.published_at() else {
            dropped += 1;
            debug!(
                title = %article.title,
                date = %article.date_text(),
                "skipping article with unparseable date"
            );
            continue;
        };
        let key = DayKey::from_datetime(&published);
        map.day_mut(key).push(article, published.timestamp_millis());
    }

    debug!(
        days = map.len(),
        articles = articles.len() - dropped,
        dropped,
        "aggregated articles into catalyst days"
    );

    Aggregation { map, dropped }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> DayKey {
        s.parse().unwrap()
    }

    #[test]
    fn empty_input_gives_empty_map() {
        let map = aggregate(&[]);
        assert!(map.is_empty());
        assert_eq!(map.article_count(), 0);
    }

    #[test]
    fn groups_same_day_in_arrival_order() {
        let articles = vec![
            Article::new("2024-01-05", "first").with_sentiment("positive"),
            Article::new("2024-01-06", "other day"),
            Article::new("2024-01-05T15:30:00Z", "second").with_sentiment("negative"),
        ];
        let map = aggregate(&articles);

        assert_eq!(map.len(), 2);
        let day = map.get(&key("2024-01-05")).unwrap();
        assert_eq!(day.titles, vec!["first", "second"]);
        assert_eq!(
            day.sentiments,
            vec![Some("positive".to_string()), Some("negative".to_string())]
        );
        assert_eq!(day.articles, vec![articles[0].clone(), articles[2].clone()]);
    }

    #[test]
    fn keys_iterate_in_first_seen_order() {
        let articles = vec![
            Article::new("2024-03-01", "c"),
            Article::new("2024-01-01", "a"),
            Article::new("2024-03-01", "c2"),
            Article::new("2024-02-01", "b"),
        ];
        let keys: Vec<String> = aggregate(&articles).keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["2024-03-01", "2024-01-01", "2024-02-01"]);
    }

    #[test]
    fn duplicates_are_preserved() {
        let a = Article::new("2024-01-05", "same");
        let map = aggregate(&[a.clone(), a.clone()]);
        assert_eq!(map.get(&key("2024-01-05")).unwrap().article_count(), 2);
    }

    #[test]
    fn undated_articles_are_dropped_not_fatal() {
        let articles = vec![
            Article::new("not a date", "bad"),
            Article::new("2024-01-05", "good"),
            Article { date: serde_json::Value::Null, ..Article::new("", "missing") },
        ];
        let report = aggregate_with_report(&articles);
        assert_eq!(report.dropped, 2);
        assert_eq!(report.map.len(), 1);
        assert_eq!(report.map.get(&key("2024-01-05")).unwrap().titles, vec!["good"]);
    }

    #[test]
    fn publication_instants_are_recorded() {
        let map = aggregate(&[Article::new("2024-01-05T23:50:00Z", "late")]);
        let day = map.get(&key("2024-01-05")).unwrap();
        assert_eq!(day.published_ms, vec![day.start_ms() + 23 * 3_600_000 + 50 * 60_000]);
    }
}
