//! # Augur Forecasting Library
//!
//! This crate contains the forecasting logic for the Augur service. It
//! defines a universal `Forecaster` trait and provides the concrete model
//! implementations behind the public model names.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   HTTP, market-data providers, or serialization concerns beyond the core
//!   types. It depends only on `core-types` and `configuration`.
//! - **Model Agnostic Engine:** By using the `Forecaster` trait, the
//!   dispatching engine can run any model without knowing its internals.
//! - **Extensibility:** Adding a model involves creating a new module,
//!   implementing the `Forecaster` trait, and adding it to the `ModelId`
//!   enum and `factory`.
//!
//! ## Public API
//!
//! The primary public components are:
//! - `Forecaster`: The core trait all models implement.
//! - `ModelId`: Identifies which model to create (re-exported from
//!   `core-types`).
//! - `create_forecaster`: The factory function to construct a model.
//! - The concrete model structs themselves (e.g., `ExponentialSmoothing`).

// Declare all the modules that constitute this crate.
pub mod error;
pub mod exponential_smoothing;
pub mod factory;
pub mod linear_regression;
pub mod moving_average;
#[cfg(feature = "seasonal")]
pub mod seasonal;

// Re-export the key components to create a clean, public-facing API.
pub use error::StrategyError;
pub use exponential_smoothing::ExponentialSmoothing;
pub use factory::create_forecaster;
pub use linear_regression::LinearRegression;
pub use moving_average::MovingAverageTrend;
#[cfg(feature = "seasonal")]
pub use seasonal::SeasonalTrend;

// Re-export ModelId from core_types
pub use core_types::ModelId;

use chrono::{Days, NaiveDate};
use core_types::{ForecastPoint, PriceSeries};

/// The core trait that all forecasting models must implement.
///
/// Models are stateless between calls: every forecast receives the full
/// prepared series and works from scratch. The `Send + Sync` bounds allow
/// boxed models to be driven from concurrent request handlers.
pub trait Forecaster: Send + Sync {
    /// Produces `horizon` daily predictions following the series' last date.
    ///
    /// # Arguments
    ///
    /// * `series` - The prepared, date-ascending price history.
    /// * `horizon` - How many future calendar days to predict.
    ///
    /// # Returns
    ///
    /// * `Ok(points)` - exactly `horizon` points, one per calendar day.
    /// * `Err(StrategyError)` - if the series is unusable or the fit fails.
    fn forecast(
        &self,
        series: &PriceSeries,
        horizon: usize,
    ) -> Result<Vec<ForecastPoint>, StrategyError>;
}

/// Reports whether this build carries the seasonal models.
pub fn seasonal_models_available() -> bool {
    cfg!(feature = "seasonal")
}

/// Projects `horizon` consecutive calendar days after the series' last date.
///
/// Weekends and holidays are not skipped; the forecast is one point per
/// calendar day.
pub(crate) fn future_dates(
    series: &PriceSeries,
    horizon: usize,
) -> Result<Vec<NaiveDate>, StrategyError> {
    let last = series.last_date().ok_or(StrategyError::SeriesTooShort {
        required: 1,
        got: 0,
    })?;
    let mut dates = Vec::with_capacity(horizon);
    for i in 1..=horizon {
        let date = last.checked_add_days(Days::new(i as u64)).ok_or_else(|| {
            StrategyError::CalculationError("Forecast date overflows the calendar".to_string())
        })?;
        dates.push(date);
    }
    Ok(dates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::RawDailyBar;
    use rust_decimal::Decimal;

    fn flat_series(len: usize) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let price = Decimal::from(100);
        let raw: Vec<RawDailyBar> = (0..len)
            .map(|i| {
                let date = start.checked_add_days(Days::new(i as u64)).unwrap();
                RawDailyBar {
                    date: date.to_string(),
                    open: price,
                    high: price,
                    low: price,
                    close: price,
                    volume: 1,
                }
            })
            .collect();
        PriceSeries::prepare(&raw).unwrap()
    }

    #[test]
    fn future_dates_are_consecutive_from_the_day_after_last() {
        let series = flat_series(3);
        let dates = future_dates(&series, 4).unwrap();
        assert_eq!(dates.len(), 4);
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2024, 1, 4).unwrap());
        for pair in dates.windows(2) {
            assert_eq!((pair[1] - pair[0]).num_days(), 1);
        }
    }

    #[test]
    fn future_dates_require_a_non_empty_series() {
        let series = flat_series(0);
        assert!(matches!(
            future_dates(&series, 1),
            Err(StrategyError::SeriesTooShort { .. })
        ));
    }
}
