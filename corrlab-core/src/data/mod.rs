//! Market data: provider abstraction, Yahoo Finance client, fetch orchestration.

pub mod fetch;
pub mod provider;
pub mod yahoo;

pub use fetch::{fetch_all, surviving_series, FetchWindow, SymbolFetch};
pub use provider::{DataError, MarketDataProvider, PriceField, PricePoint, PriceSeries};
pub use yahoo::YahooProvider;
