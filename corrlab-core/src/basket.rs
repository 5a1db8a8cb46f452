//! Ticker basket configuration — the ordered list of tracked indices.
//!
//! The basket maps human-readable display names to the market symbols used
//! for provider requests. It is loaded once at startup (TOML file or the
//! compiled-in default) and injected into the fetcher. Declaration order is
//! preserved end to end: it drives column order in the joined table and key
//! order in the output matrix.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// One tracked index: display name for output, market symbol for fetching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub name: String,
    pub symbol: String,
}

/// The ordered, immutable basket of tracked indices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerBasket {
    #[serde(rename = "indices")]
    entries: Vec<IndexEntry>,
}

#[derive(Debug, thiserror::Error)]
pub enum BasketError {
    #[error("read basket file: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse basket TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid basket: {0}")]
    Invalid(String),
}

impl TickerBasket {
    /// The default basket: six major equity indices.
    pub fn default_indices() -> Self {
        let entries = [
            ("S&P 500", "^GSPC"),
            ("NASDAQ", "^IXIC"),
            ("TSX", "^GSPTSE"),
            ("EURO STOXX 50", "^STOXX50E"),
            ("Nifty 50", "^NSEI"),
            ("Shanghai", "000001.SS"),
        ]
        .into_iter()
        .map(|(name, symbol)| IndexEntry {
            name: name.to_string(),
            symbol: symbol.to_string(),
        })
        .collect();

        Self { entries }
    }

    /// Load a basket from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, BasketError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse a basket from a TOML string and validate it.
    pub fn from_toml(content: &str) -> Result<Self, BasketError> {
        let basket: Self = toml::from_str(content)?;
        basket.validate()?;
        Ok(basket)
    }

    /// Serialize the basket to TOML.
    pub fn to_toml(&self) -> Result<String, BasketError> {
        toml::to_string_pretty(self).map_err(|e| BasketError::Invalid(e.to_string()))
    }

    fn validate(&self) -> Result<(), BasketError> {
        if self.entries.is_empty() {
            return Err(BasketError::Invalid("basket has no entries".into()));
        }
        for entry in &self.entries {
            if entry.name.trim().is_empty() {
                return Err(BasketError::Invalid(format!(
                    "entry for symbol '{}' has an empty display name",
                    entry.symbol
                )));
            }
            if entry.symbol.trim().is_empty() {
                return Err(BasketError::Invalid(format!(
                    "entry '{}' has an empty symbol",
                    entry.name
                )));
            }
        }
        for (i, entry) in self.entries.iter().enumerate() {
            for other in &self.entries[i + 1..] {
                if entry.name == other.name {
                    return Err(BasketError::Invalid(format!(
                        "duplicate display name '{}'",
                        entry.name
                    )));
                }
                if entry.symbol == other.symbol {
                    return Err(BasketError::Invalid(format!(
                        "duplicate symbol '{}'",
                        entry.symbol
                    )));
                }
            }
        }
        Ok(())
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.iter()
    }

    /// Display name for a market symbol, if the symbol is in the basket.
    pub fn display_name_for(&self, symbol: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.symbol == symbol)
            .map(|e| e.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
