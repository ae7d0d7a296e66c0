//! Catalyst correlation: aggregation, sentiment tiers, annotations, click resolution.
//!
//! Every function here is pure and synchronous. Inputs are taken explicitly and a
//! fresh result is returned; there is no shared mutable state, so the render path
//! and the click path can read the same map without coordination.

pub mod aggregate;
pub mod annotation;
pub mod interaction;
pub mod resolve;
pub mod sentiment;

pub use aggregate::{aggregate, aggregate_with_report, Aggregation, CatalystDay, CatalystMap};
pub use annotation::{
    build_annotations, tooltip_text, Annotation, AnnotationSet, TooltipResolver, MAX_LABEL_LINES,
};
pub use interaction::{query_timestamp, select_at_pixel, LinearTimeAxis, TimeAxis};
pub use resolve::{
    day_distance, nearest_day, resolve, resolve_default, SelectionResult, DEFAULT_TOLERANCE_MS,
};
pub use sentiment::{classify, ColorTier};
