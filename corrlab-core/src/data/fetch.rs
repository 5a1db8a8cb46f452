//! Per-symbol fetch orchestration.
//!
//! Fetches every basket entry in declaration order, catching each symbol's
//! failure into an explicit per-item outcome. A failed symbol is skipped
//! with a diagnostic; it never aborts the batch. No retries, no backoff —
//! the provider's own timeout bounds each call.

use super::provider::{DataError, MarketDataProvider, PriceSeries};
use crate::basket::TickerBasket;
use chrono::NaiveDate;

/// Inclusive date range for a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl FetchWindow {
    /// A trailing window of `years` calendar years ending at `end`.
    pub fn trailing_years(end: NaiveDate, years: u32) -> Self {
        let start = end - chrono::Duration::days(365 * years as i64);
        Self { start, end }
    }
}

/// Outcome of fetching one basket entry: the series, or the reason it was
/// skipped. Collected for every entry so "which symbols survived" is an
/// explicit, testable decision rather than implicit control flow.
#[derive(Debug)]
pub struct SymbolFetch {
    pub name: String,
    pub symbol: String,
    pub outcome: Result<PriceSeries, DataError>,
}

impl SymbolFetch {
    pub fn succeeded(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Fetch daily closes for every basket entry, in declaration order.
///
/// Every entry yields exactly one [`SymbolFetch`]; per-symbol errors are
/// captured, logged, and carried in the outcome. An all-failure batch
/// returns all-`Err` outcomes, not an error.
pub fn fetch_all(
    provider: &dyn MarketDataProvider,
    basket: &TickerBasket,
    window: FetchWindow,
) -> Vec<SymbolFetch> {
    let mut fetches = Vec::with_capacity(basket.len());

    for entry in basket.iter() {
        let outcome = provider.fetch_daily(&entry.symbol, window.start, window.end);

        match &outcome {
            Ok(series) => {
                tracing::debug!(
                    name = %entry.name,
                    symbol = %entry.symbol,
                    points = series.len(),
                    provider = provider.name(),
                    "fetched price series"
                );
            }
            Err(e) => {
                tracing::warn!(
                    name = %entry.name,
                    symbol = %entry.symbol,
                    error = %e,
                    "skipping symbol"
                );
            }
        }

        fetches.push(SymbolFetch {
            name: entry.name.clone(),
            symbol: entry.symbol.clone(),
            outcome,
        });
    }

    fetches
}

/// Filter fetch outcomes to the surviving series, keyed by display name.
///
/// Order follows the fetch order (and therefore basket declaration order).
/// The symbol→name rename happens here, so every downstream table is keyed
/// by display names only.
pub fn surviving_series(fetches: Vec<SymbolFetch>) -> Vec<(String, PriceSeries)> {
    fetches
        .into_iter()
        .filter_map(|f| f.outcome.ok().map(|series| (f.name, series)))
        .collect()
}
