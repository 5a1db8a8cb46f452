//! End-to-end pipeline: fetch → align → returns → correlate.

use crate::basket::TickerBasket;
use crate::correlation::CorrelationMatrix;
use crate::data::fetch::{fetch_all, surviving_series, FetchWindow};
use crate::data::provider::{MarketDataProvider, PriceSeries};
use crate::table::AlignedTable;

/// A basket entry that produced no data, with the human-readable reason.
#[derive(Debug, Clone)]
pub struct SkippedSymbol {
    pub name: String,
    pub symbol: String,
    pub reason: String,
}

/// Result of one full pipeline run: the matrix plus per-symbol skip
/// diagnostics for operator surfaces. The skips are not part of the HTTP
/// response contract.
#[derive(Debug)]
pub struct CorrelationReport {
    pub matrix: CorrelationMatrix,
    pub skipped: Vec<SkippedSymbol>,
}

/// Correlate a set of named price series.
///
/// Outer-joins on date, computes day-over-day returns per column, drops
/// every row with a missing value, and correlates all surviving column
/// pairs. An empty input or a cleaned table with no rows yields the empty
/// matrix. Deterministic: identical inputs give bit-identical output.
pub fn correlate(series: &[(String, PriceSeries)]) -> CorrelationMatrix {
    if series.is_empty() {
        return CorrelationMatrix::empty();
    }

    let cleaned = AlignedTable::outer_join(series)
        .returns()
        .drop_incomplete_rows();

    CorrelationMatrix::from_returns(&cleaned)
}

/// Fetch the whole basket over `window` and correlate the survivors.
pub fn run(
    provider: &dyn MarketDataProvider,
    basket: &TickerBasket,
    window: FetchWindow,
) -> CorrelationReport {
    let fetches = fetch_all(provider, basket, window);

    let skipped = fetches
        .iter()
        .filter_map(|f| {
            f.outcome.as_ref().err().map(|e| SkippedSymbol {
                name: f.name.clone(),
                symbol: f.symbol.clone(),
                reason: e.to_string(),
            })
        })
        .collect();

    let matrix = correlate(&surviving_series(fetches));

    CorrelationReport { matrix, skipped }
}
