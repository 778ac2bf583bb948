use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use configuration::MarketDataSettings;
use core_types::{Candle, Quote};
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::debug;

pub mod error;
pub mod responses;

// --- Public API ---
pub use error::MarketDataError;
pub use responses::{CandleResponse, QuoteResponse};

/// The generic, abstract interface for a market-data provider.
/// This trait is the contract the web layer uses, allowing the underlying
/// implementation (live or mock) to be swapped out.
#[async_trait]
pub trait MarketDataClient: Send + Sync {
    /// Fetches the current real-time quote for a symbol.
    async fn get_quote(&self, symbol: &str) -> Result<Quote, MarketDataError>;

    /// Fetches daily candles covering `from..=to`, oldest first.
    async fn get_daily_candles(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Candle>, MarketDataError>;
}

/// A concrete implementation of the `MarketDataClient` for Finnhub.
#[derive(Clone)]
pub struct FinnhubClient {
    client: reqwest::Client,
    base_url: String,
}

impl FinnhubClient {
    /// Builds a client carrying the API key on every request.
    pub fn new(settings: &MarketDataSettings) -> Result<Self, MarketDataError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "X-Finnhub-Token",
            HeaderValue::from_str(&settings.api_key).map_err(|_| {
                MarketDataError::InvalidData(
                    "API key contains characters not allowed in a header".to_string(),
                )
            })?,
        );

        Ok(Self {
            client: reqwest::Client::builder()
                .default_headers(headers)
                .build()?,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl MarketDataClient for FinnhubClient {
    async fn get_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        let url = format!("{}/quote", self.base_url);
        debug!(symbol, "Fetching quote");

        let response = self
            .client
            .get(&url)
            .query(&[("symbol", symbol)])
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(MarketDataError::Api(format!(
                "Quote request failed with {status}: {text}"
            )));
        }

        let raw: QuoteResponse = serde_json::from_str(&text).map_err(|e| {
            MarketDataError::InvalidData(format!("Failed to deserialize quote: {e}"))
        })?;
        raw.into_quote()
    }

    async fn get_daily_candles(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Candle>, MarketDataError> {
        let url = format!("{}/stock/candle", self.base_url);
        debug!(symbol, %from, %to, "Fetching daily candles");

        let from_ts = from.and_time(NaiveTime::MIN).and_utc().timestamp();
        // The range is inclusive of `to`, so the cutoff is the last second
        // of that day.
        let to_ts = to
            .succ_opt()
            .ok_or_else(|| {
                MarketDataError::InvalidData("Date range end overflows the calendar".to_string())
            })?
            .and_time(NaiveTime::MIN)
            .and_utc()
            .timestamp()
            - 1;

        let response = self
            .client
            .get(&url)
            .query(&[
                ("symbol", symbol),
                ("resolution", "D"),
                ("from", &from_ts.to_string()),
                ("to", &to_ts.to_string()),
            ])
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(MarketDataError::Api(format!(
                "Candle request failed with {status}: {text}"
            )));
        }

        let raw: CandleResponse = serde_json::from_str(&text).map_err(|e| {
            MarketDataError::InvalidData(format!("Failed to deserialize candles: {e}"))
        })?;
        raw.into_candles()
    }
}
