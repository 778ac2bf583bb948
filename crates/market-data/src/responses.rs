use chrono::{TimeZone, Utc};
use core_types::{Candle, Quote};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::MarketDataError;

// The provider keys its JSON with single letters; `#[serde(rename)]` maps
// them onto readable field names.

/// The response from a `GET /quote` request.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteResponse {
    /// Current price.
    #[serde(rename = "c")]
    pub current: Decimal,
    /// Absolute change since the previous close. Null for unknown symbols.
    #[serde(rename = "d", default)]
    pub change: Option<Decimal>,
    /// Percent change since the previous close. Null for unknown symbols.
    #[serde(rename = "dp", default)]
    pub percent_change: Option<Decimal>,
    /// Unix timestamp (seconds) of the quote.
    #[serde(rename = "t")]
    pub timestamp: i64,
}

impl QuoteResponse {
    /// Converts the provider payload into the domain quote.
    pub fn into_quote(self) -> Result<Quote, MarketDataError> {
        let timestamp = Utc
            .timestamp_opt(self.timestamp, 0)
            .single()
            .ok_or_else(|| {
                MarketDataError::InvalidData(format!(
                    "Invalid quote timestamp: {}",
                    self.timestamp
                ))
            })?;
        Ok(Quote {
            price: self.current,
            change: self.change.unwrap_or_default(),
            percent_change: self.percent_change.unwrap_or_default(),
            timestamp,
        })
    }
}

/// The response from a `GET /stock/candle` request: a status flag plus
/// parallel arrays, one entry per trading day.
#[derive(Debug, Clone, Deserialize)]
pub struct CandleResponse {
    #[serde(rename = "s")]
    pub status: String,
    #[serde(rename = "t", default)]
    pub timestamps: Vec<i64>,
    #[serde(rename = "o", default)]
    pub opens: Vec<Decimal>,
    #[serde(rename = "h", default)]
    pub highs: Vec<Decimal>,
    #[serde(rename = "l", default)]
    pub lows: Vec<Decimal>,
    #[serde(rename = "c", default)]
    pub closes: Vec<Decimal>,
    #[serde(rename = "v", default)]
    pub volumes: Vec<u64>,
}

impl CandleResponse {
    /// Zips the parallel arrays into candles, oldest first as delivered.
    pub fn into_candles(self) -> Result<Vec<Candle>, MarketDataError> {
        if self.status != "ok" {
            return Err(if self.status == "no_data" {
                MarketDataError::NoData
            } else {
                MarketDataError::Api(format!(
                    "Candle request returned status '{}'",
                    self.status
                ))
            });
        }

        let len = self.timestamps.len();
        let widths = [
            self.opens.len(),
            self.highs.len(),
            self.lows.len(),
            self.closes.len(),
            self.volumes.len(),
        ];
        if widths.iter().any(|&w| w != len) {
            return Err(MarketDataError::InvalidData(
                "Candle arrays have mismatched lengths".to_string(),
            ));
        }

        let mut candles = Vec::with_capacity(len);
        for i in 0..len {
            let ts = self.timestamps[i];
            let date = Utc
                .timestamp_opt(ts, 0)
                .single()
                .ok_or_else(|| {
                    MarketDataError::InvalidData(format!("Invalid candle timestamp: {ts}"))
                })?
                .date_naive();
            candles.push(Candle {
                date,
                open: self.opens[i],
                high: self.highs[i],
                low: self.lows[i],
                close: self.closes[i],
                volume: self.volumes[i],
            });
        }
        Ok(candles)
    }
}
