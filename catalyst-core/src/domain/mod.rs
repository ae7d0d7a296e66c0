//! Domain types for the catalyst chart

pub mod article;
pub mod day;
pub mod price;

pub use article::Article;
pub use day::{parse_instant, DayKey, MS_PER_DAY};
pub use price::{CandlestickPoint, PriceRow, VolumePoint};

/// Symbol type alias
pub type Symbol = String;
