//! Local fixture source for offline use.
//!
//! Layout, symbol upper-cased:
//! - `{dir}/{SYMBOL}.prices.json` (same shape as the feed) or `{dir}/{SYMBOL}.prices.csv`
//!   with a `Date,Open,High,Low,Close,Volume` header
//! - `{dir}/{SYMBOL}.articles.json`

use std::fs;
use std::path::{Path, PathBuf};

use super::provider::{ArticleSource, DataError, PriceSource};
use crate::domain::{Article, PriceRow};

pub struct FileSource {
    dir: PathBuf,
}

impl FileSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, symbol: &str, suffix: &str) -> PathBuf {
        self.dir.join(format!("{}.{suffix}", symbol.to_uppercase()))
    }

    fn read(path: &Path) -> Result<String, DataError> {
        fs::read_to_string(path).map_err(|e| DataError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, DataError> {
        let content = Self::read(path)?;
        serde_json::from_str(&content).map_err(|e| {
            DataError::ResponseFormatChanged(format!("failed to parse {}: {e}", path.display()))
        })
    }

    fn read_csv(path: &Path) -> Result<Vec<PriceRow>, DataError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| DataError::Io {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        reader
            .deserialize::<PriceRow>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| {
                DataError::ResponseFormatChanged(format!("failed to parse {}: {e}", path.display()))
            })
    }
}

impl PriceSource for FileSource {
    fn name(&self) -> &str {
        "files"
    }

    fn fetch_prices(&self, symbol: &str) -> Result<Vec<PriceRow>, DataError> {
        let json = self.path_for(symbol, "prices.json");
        if json.exists() {
            return Self::read_json(&json);
        }
        let csv = self.path_for(symbol, "prices.csv");
        if csv.exists() {
            return Self::read_csv(&csv);
        }
        Err(DataError::SymbolNotFound {
            symbol: symbol.to_uppercase(),
        })
    }
}

impl ArticleSource for FileSource {
    fn name(&self) -> &str {
        "files"
    }

    fn fetch_articles(&self, symbol: &str) -> Result<Vec<Article>, DataError> {
        let json = self.path_for(symbol, "articles.json");
        if !json.exists() {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_uppercase(),
            });
        }
        Self::read_json(&json)
    }
}
