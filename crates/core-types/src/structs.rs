use std::num::NonZeroU32;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Wire format for trading dates: `2024-01-31`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single daily OHLCV bar with a fully parsed trading date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub date: NaiveDate,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: u64,
}

/// A daily bar as it arrives over the wire, with the date still a string.
///
/// `GET /historical/{symbol}` responses and `POST /predict` request bodies
/// share this shape, so a fetched history can be posted back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDailyBar {
    pub date: String,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: u64,
}

/// A normalized, date-ascending price history ready for the models.
///
/// [`PriceSeries::prepare`] is the only way to construct one, so every
/// series a strategy receives has already been parsed and sorted.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    candles: Vec<Candle>,
}

impl PriceSeries {
    /// Parses and normalizes raw daily bars into a sorted series.
    ///
    /// Dates must match [`DATE_FORMAT`]. The sort is stable and ascending
    /// by date, so bars sharing a date keep their original relative order.
    /// Nothing is deduplicated or gap-filled.
    pub fn prepare(raw: &[RawDailyBar]) -> Result<Self, CoreError> {
        let mut candles = Vec::with_capacity(raw.len());
        for bar in raw {
            let date = NaiveDate::parse_from_str(&bar.date, DATE_FORMAT).map_err(|e| {
                CoreError::InvalidInput("date".to_string(), format!("'{}': {}", bar.date, e))
            })?;
            candles.push(Candle {
                date,
                open: bar.open,
                high: bar.high,
                low: bar.low,
                close: bar.close,
                volume: bar.volume,
            });
        }
        candles.sort_by_key(|c| c.date);
        Ok(Self { candles })
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    /// Returns the date of the most recent bar, if the series is non-empty.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.candles.last().map(|c| c.date)
    }

    /// Returns the closing prices as `f64` for the numeric models.
    ///
    /// The regression math runs on `f64`; this is the one conversion point
    /// from `Decimal`. Values that do not fit become `0.0`.
    pub fn closes(&self) -> Vec<f64> {
        self.candles
            .iter()
            .map(|c| c.close.to_f64().unwrap_or(0.0))
            .collect()
    }
}

/// Body of `POST /predict`.
///
/// `model` stays a string here; the dispatcher parses it, so an unknown
/// name surfaces as a domain error rather than a deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastRequest {
    pub symbol: String,
    pub model: String,
    pub days: NonZeroU32,
    pub historical: Vec<RawDailyBar>,
}

/// One predicted close on a future calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// The dispatcher's reply: exactly `days` points, date-ascending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    pub symbol: String,
    /// The model name as requested, even when a fallback produced the numbers.
    pub model: String,
    pub predictions: Vec<ForecastPoint>,
}

/// A real-time quote as reported by the market-data provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub price: Decimal,
    pub change: Decimal,
    pub percent_change: Decimal,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn bar(date: &str, close: Decimal) -> RawDailyBar {
        RawDailyBar {
            date: date.to_string(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1_000,
        }
    }

    #[test]
    fn prepare_sorts_ascending_by_date() {
        let raw = vec![
            bar("2024-03-01", dec!(30)),
            bar("2024-01-01", dec!(10)),
            bar("2024-02-01", dec!(20)),
        ];
        let series = PriceSeries::prepare(&raw).unwrap();
        let dates: Vec<String> = series
            .candles()
            .iter()
            .map(|c| c.date.to_string())
            .collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-02-01", "2024-03-01"]);
    }

    #[test]
    fn prepare_keeps_duplicate_dates_in_input_order() {
        let raw = vec![
            bar("2024-01-02", dec!(2)),
            bar("2024-01-01", dec!(1)),
            bar("2024-01-02", dec!(3)),
        ];
        let series = PriceSeries::prepare(&raw).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.candles()[1].close, dec!(2));
        assert_eq!(series.candles()[2].close, dec!(3));
    }

    #[test]
    fn prepare_is_idempotent() {
        let raw = vec![
            bar("2024-01-03", dec!(3)),
            bar("2024-01-01", dec!(1)),
            bar("2024-01-02", dec!(2)),
        ];
        let once = PriceSeries::prepare(&raw).unwrap();
        let back: Vec<RawDailyBar> = once
            .candles()
            .iter()
            .map(|c| RawDailyBar {
                date: c.date.to_string(),
                open: c.open,
                high: c.high,
                low: c.low,
                close: c.close,
                volume: c.volume,
            })
            .collect();
        let twice = PriceSeries::prepare(&back).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn prepare_rejects_malformed_dates() {
        let raw = vec![bar("01/15/2024", dec!(1))];
        let err = PriceSeries::prepare(&raw).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(field, _) if field == "date"));
    }

    #[test]
    fn candle_serializes_iso_dates_and_numeric_prices() {
        let candle = Candle {
            date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            open: dec!(101.5),
            high: dec!(103.0),
            low: dec!(100.25),
            close: dec!(102.75),
            volume: 5_000,
        };
        let json = serde_json::to_value(&candle).unwrap();
        assert_eq!(json["date"], "2024-01-31");
        assert!(json["close"].is_number());
        assert_eq!(json["volume"], 5_000);
    }

    #[test]
    fn forecast_request_rejects_zero_days() {
        let body = serde_json::json!({
            "symbol": "AAPL",
            "model": "lstm",
            "days": 0,
            "historical": [],
        });
        assert!(serde_json::from_value::<ForecastRequest>(body).is_err());
    }
}
