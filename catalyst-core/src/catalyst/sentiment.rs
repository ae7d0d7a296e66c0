//! Sentiment classification into marker color tiers.

use serde::{Deserialize, Serialize};

/// Display tier for a catalyst day's marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorTier {
    Positive,
    Negative,
    MixedNeutral,
}

impl ColorTier {
    /// Marker color handed to the chart renderer.
    pub fn color(self) -> &'static str {
        match self {
            ColorTier::Positive => "green",
            ColorTier::Negative => "red",
            ColorTier::MixedNeutral => "orange",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ColorTier::Positive => "positive",
            ColorTier::Negative => "negative",
            ColorTier::MixedNeutral => "mixed-neutral",
        }
    }
}

fn is_label(sentiment: &Option<String>, label: &str) -> bool {
    sentiment
        .as_deref()
        .is_some_and(|s| s.eq_ignore_ascii_case(label))
}

/// Reduce a day's sentiment labels to one tier.
///
/// Precedence, not averaging: any "positive" wins, even alongside "negative".
/// Unknown, empty and missing labels never match. Empty input is `MixedNeutral`.
pub fn classify(sentiments: &[Option<String>]) -> ColorTier {
    if sentiments.iter().any(|s| is_label(s, "positive")) {
        ColorTier::Positive
    } else if sentiments.iter().any(|s| is_label(s, "negative")) {
        ColorTier::Negative
    } else {
        ColorTier::MixedNeutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[Option<&str>]) -> Vec<Option<String>> {
        items.iter().map(|s| s.map(String::from)).collect()
    }

    #[test]
    fn empty_is_mixed_neutral() {
        assert_eq!(classify(&[]), ColorTier::MixedNeutral);
    }

    #[test]
    fn positive_beats_negative() {
        let s = labels(&[Some("negative"), Some("positive")]);
        assert_eq!(classify(&s), ColorTier::Positive);
    }

    #[test]
    fn negative_without_positive() {
        let s = labels(&[Some("Neutral"), None, Some("NEGATIVE")]);
        assert_eq!(classify(&s), ColorTier::Negative);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(classify(&labels(&[Some("Positive")])), ColorTier::Positive);
        assert_eq!(classify(&labels(&[Some("pOsItIvE")])), ColorTier::Positive);
    }

    #[test]
    fn unknown_and_missing_labels_are_ignored() {
        let s = labels(&[None, Some(""), Some("neutral"), Some("positive-ish")]);
        assert_eq!(classify(&s), ColorTier::MixedNeutral);
    }

    #[test]
    fn tier_colors() {
        assert_eq!(ColorTier::Positive.color(), "green");
        assert_eq!(ColorTier::Negative.color(), "red");
        assert_eq!(ColorTier::MixedNeutral.color(), "orange");
        assert_eq!(
            serde_json::to_string(&ColorTier::MixedNeutral).unwrap(),
            "\"mixed-neutral\""
        );
    }
}
