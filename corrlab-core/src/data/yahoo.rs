//! Yahoo Finance data provider.
//!
//! Fetches daily closing prices from Yahoo's v8 chart API. The adjusted
//! close track is preferred when the response carries one; the raw close is
//! the fallback. Per-symbol failures are reported as [`DataError`] and
//! handled by the fetcher's skip logic — there are no retries here, and a
//! 30-second client timeout bounds every call.
//!
//! Yahoo Finance has no official API and is subject to unannounced format
//! changes.

use super::provider::{DataError, MarketDataProvider, PriceField, PricePoint, PriceSeries};
use chrono::NaiveDate;
use serde::Deserialize;
use std::time::Duration;

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
    adjclose: Option<Vec<AdjCloseData>>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    close: Option<Vec<Option<f64>>>,
}

#[derive(Debug, Deserialize)]
struct AdjCloseData {
    adjclose: Vec<Option<f64>>,
}

/// Yahoo Finance data provider.
pub struct YahooProvider {
    client: reqwest::blocking::Client,
}

impl YahooProvider {
    pub fn new() -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .map_err(|e| DataError::Provider(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Build the chart API URL for a symbol and date range.
    fn chart_url(symbol: &str, start: NaiveDate, end: NaiveDate) -> String {
        let start_ts = start
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp())
            .unwrap_or(0);
        let end_ts = end
            .and_hms_opt(23, 59, 59)
            .map(|dt| dt.and_utc().timestamp())
            .unwrap_or(0);
        format!(
            "https://query2.finance.yahoo.com/v8/finance/chart/{symbol}\
             ?period1={start_ts}&period2={end_ts}&interval=1d\
             &includeAdjustedClose=true"
        )
    }

    /// Parse the chart API response into a closing-price series.
    ///
    /// Column preference is made once per response: the adjclose track when
    /// present, otherwise the raw close track. Rows where the chosen track
    /// has no value (holidays, partial sessions) are dropped.
    fn parse_response(symbol: &str, resp: ChartResponse) -> Result<PriceSeries, DataError> {
        let result = resp.chart.result.ok_or_else(|| {
            if let Some(err) = resp.chart.error {
                if err.code == "Not Found" {
                    DataError::SymbolNotFound {
                        symbol: symbol.to_string(),
                    }
                } else {
                    DataError::ResponseFormat(format!("{}: {}", err.code, err.description))
                }
            } else {
                DataError::ResponseFormat("empty result with no error".into())
            }
        })?;

        let data = result
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormat("result array is empty".into()))?;

        let timestamps = data
            .timestamp
            .ok_or_else(|| DataError::ResponseFormat("no timestamps".into()))?;

        let adj_closes = data
            .indicators
            .adjclose
            .and_then(|v| v.into_iter().next())
            .map(|a| a.adjclose);

        let closes = data
            .indicators
            .quote
            .into_iter()
            .next()
            .and_then(|q| q.close);

        let (field, prices) = match (adj_closes, closes) {
            (Some(adj), _) => (PriceField::AdjClose, adj),
            (None, Some(raw)) => (PriceField::Close, raw),
            (None, None) => {
                return Err(DataError::NoPriceField {
                    symbol: symbol.to_string(),
                })
            }
        };

        let mut points = Vec::with_capacity(timestamps.len());
        for (i, &ts) in timestamps.iter().enumerate() {
            let Some(close) = prices.get(i).copied().flatten() else {
                continue;
            };
            let date = chrono::DateTime::from_timestamp(ts, 0)
                .map(|dt| dt.naive_utc().date())
                .ok_or_else(|| DataError::ResponseFormat(format!("invalid timestamp: {ts}")))?;
            points.push(PricePoint { date, close });
        }

        if points.is_empty() {
            return Err(DataError::EmptySeries {
                symbol: symbol.to_string(),
            });
        }

        Ok(PriceSeries::new(symbol, field, points))
    }

    fn fetch_once(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, DataError> {
        let url = Self::chart_url(symbol, start, end);

        let resp = self.client.get(&url).send().map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                DataError::Network(e.to_string())
            } else {
                DataError::Provider(e.to_string())
            }
        })?;

        let status = resp.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = resp
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(DataError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }

        if !status.is_success() {
            return Err(DataError::Provider(format!("HTTP {status} for {symbol}")));
        }

        let chart: ChartResponse = resp.json().map_err(|e| {
            DataError::ResponseFormat(format!("failed to parse response for {symbol}: {e}"))
        })?;

        Self::parse_response(symbol, chart)
    }
}

impl MarketDataProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn fetch_daily(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, DataError> {
        self.fetch_once(symbol, start, end)
    }
}
