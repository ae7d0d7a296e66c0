//! Article: one news record as delivered by the article feed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::day::parse_instant;

/// A news article with its model-generated summary and sentiment.
///
/// `date` is kept exactly as the feed sent it (text or epoch milliseconds, possibly
/// missing) so a record with a malformed date still deserializes; whether it can be
/// placed on a day is decided later by [`Article::published_at`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub date: Value,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub category: String,
    #[serde(default)]
    pub sentiment: Option<String>,
}

impl Article {
    /// Article dated with a textual instant and carrying only a title.
    pub fn new(date: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            date: Value::String(date.into()),
            title: title.into(),
            summary: String::new(),
            content: String::new(),
            category: String::new(),
            sentiment: None,
        }
    }

    pub fn with_sentiment(mut self, sentiment: impl Into<String>) -> Self {
        self.sentiment = Some(sentiment.into());
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Publication instant, or `None` when the date is missing or unparseable.
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        match &self.date {
            Value::String(text) => parse_instant(text),
            Value::Number(n) => {
                let ms = match n.as_i64() {
                    Some(ms) => ms,
                    None => {
                        let f = n.as_f64()?;
                        if !f.is_finite() {
                            return None;
                        }
                        f.trunc() as i64
                    }
                };
                DateTime::<Utc>::from_timestamp_millis(ms)
            }
            _ => None,
        }
    }

    /// The date as display text (`"(no date)"` when absent).
    pub fn date_text(&self) -> String {
        match &self.date {
            Value::String(text) => text.clone(),
            Value::Null => "(no date)".to_string(),
            other => other.to_string(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_feed_record() {
        let json = r#"{
            "id": 17,
            "symbol": "CAPR",
            "date": "Fri, 05 Jan 2024 00:00:00 GMT",
            "title": "Phase 3 topline data",
            "summary": "Primary endpoint met.",
            "content": "Full text",
            "category": "Clinical Trial",
            "sentiment": "Positive"
        }"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.title, "Phase 3 topline data");
        assert_eq!(article.sentiment.as_deref(), Some("Positive"));
        assert_eq!(
            article.published_at().unwrap().to_rfc3339(),
            "2024-01-05T00:00:00+00:00"
        );
    }

    #[test]
    fn unsummarized_article_has_null_fields() {
        let json = r#"{"date": "2024-01-05", "title": "PR", "summary": null,
                       "category": null, "sentiment": null}"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.summary, "");
        assert_eq!(article.category, "");
        assert!(article.sentiment.is_none());
    }

    #[test]
    fn numeric_date_is_epoch_millis() {
        let json = r#"{"date": 1704499200000, "title": "t"}"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(
            article.published_at().unwrap().to_rfc3339(),
            "2024-01-06T00:00:00+00:00"
        );
    }

    #[test]
    fn malformed_date_still_deserializes() {
        let json = r#"{"date": true, "title": "t"}"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert!(article.published_at().is_none());

        let missing: Article = serde_json::from_str(r#"{"title": "t"}"#).unwrap();
        assert!(missing.published_at().is_none());
        assert_eq!(missing.date_text(), "(no date)");
    }
}
