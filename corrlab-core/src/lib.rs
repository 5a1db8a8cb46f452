//! CorrLab Core — index-basket correlation pipeline.
//!
//! This crate contains everything between the HTTP/CLI surfaces and the
//! market-data provider:
//! - Ticker basket configuration (display name → market symbol, ordered)
//! - Provider abstraction + Yahoo Finance implementation
//! - Per-symbol fetch orchestration with skip-on-error semantics
//! - Outer join of price series on a common date axis
//! - Day-over-day returns with strict missing-value handling
//! - Pairwise Pearson correlation matrix, serialized as a nested mapping

pub mod basket;
pub mod correlation;
pub mod data;
pub mod pipeline;
pub mod table;

pub use basket::TickerBasket;
pub use correlation::CorrelationMatrix;
pub use pipeline::{correlate, run, CorrelationReport};
