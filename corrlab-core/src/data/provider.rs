//! Market-data provider abstraction.
//!
//! A provider turns (symbol, date range) into a single daily closing-price
//! series. The trait seam exists so the pipeline can be driven by a mock in
//! tests; the production implementation is [`crate::data::yahoo::YahooProvider`].

use chrono::NaiveDate;

/// One daily observation: date plus closing price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Which provider column a series was built from.
///
/// Dividend/split-adjusted closes are preferred for return calculations;
/// the raw close is the fallback when the provider has no adjusted track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceField {
    AdjClose,
    Close,
}

/// Daily closing prices for one symbol, ordered by date ascending with no
/// duplicate dates.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    symbol: String,
    field: PriceField,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series, sorting by date and collapsing duplicate dates
    /// (last observation wins).
    pub fn new(symbol: impl Into<String>, field: PriceField, mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.date);
        points.dedup_by(|next, prev| {
            if next.date == prev.date {
                prev.close = next.close;
                true
            } else {
                false
            }
        });
        Self {
            symbol: symbol.into(),
            field,
            points,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn field(&self) -> PriceField {
        self.field
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }
}

/// Errors a provider fetch can produce. All of them are non-fatal at the
/// batch level: the fetcher skips the symbol and moves on.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("no usable price field for {symbol}")]
    NoPriceField { symbol: String },

    #[error("empty price series for {symbol}")]
    EmptySeries { symbol: String },

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("unexpected provider response: {0}")]
    ResponseFormat(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("provider error: {0}")]
    Provider(String),
}

/// Source of daily closing-price history.
pub trait MarketDataProvider {
    fn name(&self) -> &str;

    /// Fetch daily closes for `symbol` over `[start, end]`.
    ///
    /// The returned series is non-empty; providers map an empty result to
    /// [`DataError::EmptySeries`] or [`DataError::SymbolNotFound`].
    fn fetch_daily(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, DataError>;
}
