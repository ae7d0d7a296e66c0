//! Chart annotations and tooltip footers derived from a catalyst map.
//!
//! Both outputs are rebuilt from scratch on every call; nothing here is mutated
//! in place, so a render path can recompute them from the current map at will.

use serde::Serialize;
use std::collections::BTreeMap;

use super::aggregate::{CatalystDay, CatalystMap};
use super::sentiment::{classify, ColorTier};
use crate::domain::DayKey;

/// Titles shown per marker label and per tooltip footer.
pub const MAX_LABEL_LINES: usize = 3;

pub const TOOLTIP_PREFIX: &str = "News: ";
pub const TOOLTIP_SEPARATOR: &str = "; ";

/// Vertical marker with a label, one per catalyst day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    /// Position of the day in this build pass. Not stable across rebuilds.
    pub id: usize,
    pub day: DayKey,
    pub timestamp_ms: i64,
    pub color_tier: ColorTier,
    pub label_lines: Vec<String>,
}

impl Annotation {
    /// Renderer-facing key, e.g. `catalyst-0`.
    pub fn key(&self) -> String {
        format!("catalyst-{}", self.id)
    }

    pub fn color(&self) -> &'static str {
        self.color_tier.color()
    }

    /// Label lines joined for a multi-line text box.
    pub fn label_text(&self) -> String {
        self.label_lines.join("\n")
    }
}

/// Tooltip footer lookup by day, or by a chart x-value in milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TooltipResolver {
    footers: BTreeMap<DayKey, String>,
}

impl TooltipResolver {
    pub fn footer(&self, day: &DayKey) -> Option<&str> {
        self.footers.get(day).map(String::as_str)
    }

    /// Footer for the UTC day containing `x_ms`.
    pub fn footer_at(&self, x_ms: i64) -> Option<&str> {
        DayKey::from_timestamp_ms(x_ms).and_then(|day| self.footer(&day))
    }

    pub fn len(&self) -> usize {
        self.footers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.footers.is_empty()
    }
}

/// Annotations in catalyst-map order plus the matching tooltip resolver.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnnotationSet {
    pub annotations: Vec<Annotation>,
    pub tooltips: TooltipResolver,
}

/// `"News: T1; T2; T3"` for a day with titles, `None` otherwise.
pub fn tooltip_text(day: &CatalystDay) -> Option<String> {
    if day.titles.is_empty() {
        return None;
    }
    let shown: Vec<&str> = day
        .titles
        .iter()
        .take(MAX_LABEL_LINES)
        .map(String::as_str)
        .collect();
    Some(format!("{TOOLTIP_PREFIX}{}", shown.join(TOOLTIP_SEPARATOR)))
}

/// Build one annotation per catalyst day and the tooltip footers.
pub fn build_annotations(map: &CatalystMap) -> AnnotationSet {
    let mut annotations = Vec::with_capacity(map.len());
    let mut footers = BTreeMap::new();

    for (id, day) in map.iter().enumerate() {
        annotations.push(Annotation {
            id,
            day: day.key,
            timestamp_ms: day.start_ms(),
            color_tier: classify(&day.sentiments),
            label_lines: day.titles.iter().take(MAX_LABEL_LINES).cloned().collect(),
        });
        if let Some(text) = tooltip_text(day) {
            footers.insert(day.key, text);
        }
    }

    AnnotationSet {
        annotations,
        tooltips: TooltipResolver { footers },
    }
}
